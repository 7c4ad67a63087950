//! Unit definition tables.
//!
//! Definitions use the form `name = expression [= alias ...]`, where the
//! expression is either a unit expression over previously defined names or a
//! bracketed base dimension (`[length]`, or `[]` for dimensionless).

/// Standard dimensional units, in dependency order.
pub const BASE_DEFINITIONS: &[&str] = &[
    // base units
    "meter = [length] = m = metre",
    "gram = [mass] = g",
    "second = [time] = s = sec",
    "mole = [substance] = mol",
    "kelvin = [temperature] = K",
    "ampere = [current] = A",
    "candela = [luminosity] = cd",
    "count = []",
    "dimensionless = []",
    // time
    "minute = 60 * second = min",
    "hour = 60 * minute = h = hr",
    "day = 24 * hour = d",
    "week = 7 * day",
    "year = 365.25 * day = julian_year",
    "month = year / 12",
    // length, volume, mass
    "inch = 0.0254 * meter = in",
    "foot = 12 * inch = ft",
    "liter = decimeter ** 3 = l = L = litre",
    "pound = 0.45359237 * kilogram = lb",
    "ounce = pound / 16 = oz",
    // derived
    "molar = mole / liter = M",
    "hertz = 1 / second = Hz",
    "newton = kilogram * meter / second ** 2 = N",
    "joule = newton * meter = J",
    "calorie = 4.184 * joule = cal",
    "watt = joule / second = W",
    "pascal = newton / meter ** 2 = Pa",
    "bar = 100000 * pascal",
    "millimeter_Hg = 133.322387415 * pascal = mmHg",
    "katal = mole / second = kat",
];

/// The custom vocabulary. Curated data and downstream calculations depend on
/// these resolving exactly as written.
pub const CUSTOM_DEFINITIONS: &[&str] = &[
    "cups = count",
    "beverages = count",
    "none = count",
    "yr = year",
    "percent = 0.01*count",
    "U = 60*10**6*mol/second",
    "IU = [activity_amount]",
    "NO_UNIT = [no_unit]",
];

/// Sentinel unit meaning "this measurement type legitimately has no unit".
pub const NO_UNIT: &str = "NO_UNIT";

/// SI prefixes as (name, symbols, factor).
pub const PREFIXES: &[(&str, &[&str], f64)] = &[
    ("femto", &["f"], 1e-15),
    ("pico", &["p"], 1e-12),
    ("nano", &["n"], 1e-9),
    ("micro", &["µ", "μ", "u"], 1e-6),
    ("milli", &["m"], 1e-3),
    ("centi", &["c"], 1e-2),
    ("deci", &["d"], 1e-1),
    ("deca", &["da"], 1e1),
    ("hecto", &["h"], 1e2),
    ("kilo", &["k"], 1e3),
    ("mega", &["M"], 1e6),
    ("giga", &["G"], 1e9),
];
