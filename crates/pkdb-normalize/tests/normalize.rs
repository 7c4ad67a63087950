//! Normalization against the shipped measurement types.

use std::sync::Arc;

use pkdb_model::{MeasurementTypeCatalog, Record, RecordField, StatValue, Violation};
use pkdb_normalize::Normalizer;
use pkdb_units::UnitRegistry;
use proptest::prelude::*;
use serde_json::json;

fn catalog() -> MeasurementTypeCatalog {
    let registry = Arc::new(UnitRegistry::standard().expect("standard registry"));
    pkdb_standards::embedded_catalog(registry).expect("embedded catalog")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn grams_to_kilograms() {
    let catalog = catalog();
    let weight = catalog.get("weight").unwrap();
    let (value, unit) = Normalizer::new(&catalog)
        .normalize(weight, 1000.0, "g")
        .unwrap();
    assert!(close(value, 1.0));
    assert_eq!(unit.name(), "kg");
}

#[test]
fn each_dimension_has_its_own_canonical_unit() {
    let catalog = catalog();
    let normalizer = Normalizer::new(&catalog);
    let dosing = catalog.get("dosing").unwrap();

    let (value, unit) = normalizer.normalize(dosing, 0.5, "g").unwrap();
    assert_eq!((unit.name(), close(value, 500.0)), ("mg", true));

    let (value, unit) = normalizer.normalize(dosing, 2.0, "µmol").unwrap();
    assert_eq!((unit.name(), close(value, 0.002)), ("mmol", true));

    let (value, unit) = normalizer.normalize(dosing, 1.0, "g/kg").unwrap();
    assert_eq!((unit.name(), close(value, 1000.0)), ("mg/kg", true));
}

#[test]
fn unsupported_dimension_is_rejected() {
    let catalog = catalog();
    let weight = catalog.get("weight").unwrap();
    let error = Normalizer::new(&catalog)
        .normalize(weight, 1.0, "ml")
        .unwrap_err();
    assert_eq!(error.code(), "dimension_not_supported");
    assert_eq!(error.field(), RecordField::Unit);
}

#[test]
fn undefined_unit_is_rejected() {
    let catalog = catalog();
    let weight = catalog.get("weight").unwrap();
    let error = Normalizer::new(&catalog)
        .normalize(weight, 1.0, "stone")
        .unwrap_err();
    assert_eq!(
        error,
        Violation::UnitUndefined {
            field: RecordField::Unit,
            unit: "stone".to_string()
        }
    );
}

#[test]
fn international_units_never_become_mass() {
    let catalog = catalog();
    let concentration = catalog.get("concentration").unwrap();
    let (value, unit) = Normalizer::new(&catalog)
        .normalize(concentration, 5.0, "mIU/ml")
        .unwrap();
    assert_eq!(unit.name(), "IU/l");
    assert!(close(value, 5.0));
}

#[test]
fn record_statistics_are_rescaled() {
    let catalog = catalog();
    let concentration = catalog.get("concentration").unwrap();
    let record: Record = serde_json::from_value(json!({
        "unit": "µg/ml",
        "mean": [0.5, 1.5],
        "sd": 0.1,
        "cv": 0.2,
        "min": "below detection",
        "time": [1, 2],
        "time_unit": "h"
    }))
    .unwrap();
    let normalized = Normalizer::new(&catalog)
        .normalize_record(concentration, &record)
        .unwrap();
    assert_eq!(normalized.unit.as_deref(), Some("mg/l"));
    match normalized.mean {
        Some(StatValue::Series(ref values)) => {
            assert_eq!(values.len(), 2);
            assert!(close(values[0], 0.5) && close(values[1], 1.5), "{values:?}");
        }
        ref other => panic!("unexpected mean: {other:?}"),
    }
    assert!(close(normalized.sd.as_ref().and_then(StatValue::as_scalar).unwrap(), 0.1));
    assert_eq!(normalized.cv, record.cv);
    assert_eq!(normalized.min, record.min);
    assert_eq!(normalized.time, record.time);
    assert_eq!(normalized.time_unit, record.time_unit);

    let in_nanograms = Record::new()
        .with_unit("ng/ml")
        .with_stat(RecordField::Value, 250.0)
        .with_stat(RecordField::Cv, 0.3);
    let normalized = Normalizer::new(&catalog)
        .normalize_record(concentration, &in_nanograms)
        .unwrap();
    assert!(close(normalized.value.unwrap().as_scalar().unwrap(), 0.25));
    assert_eq!(normalized.cv, Some(StatValue::Scalar(0.3)));
}

#[test]
fn records_without_unit_are_unchanged() {
    let catalog = catalog();
    let ratio = catalog.get("metabolic ratio").unwrap();
    let record = Record::new().with_stat(RecordField::Value, 0.4);
    let normalized = Normalizer::new(&catalog)
        .normalize_record(ratio, &record)
        .unwrap();
    assert_eq!(normalized, record);
}

/// (measurement type, unit, other unit of the same dimension)
const SAME_DIMENSION: &[(&str, &str, &str)] = &[
    ("weight", "g", "lb"),
    ("weight", "kg", "g"),
    ("height", "in", "cm"),
    ("concentration", "µg/ml", "g/l"),
    ("concentration", "µmol/l", "mmol/l"),
    ("concentration", "ng/ml", "mg/l"),
    ("auc_end", "ng*h/ml", "mg*h/l"),
    ("clearance", "ml/min", "l/h"),
    ("clearance", "ml/min/kg", "l/h/kg"),
    ("tmax", "min", "h"),
    ("kel", "1/min", "1/h"),
    ("dosing", "g", "µg"),
    ("enzyme activity", "µmol/min/ml", "U/l"),
    ("caffeine consumption", "cups/week", "cups/day"),
    ("recovery", "percent", "dimensionless"),
];

proptest! {
    #[test]
    fn normalization_is_idempotent(
        magnitude in 0.0f64..1e6,
        case in proptest::sample::select(SAME_DIMENSION),
    ) {
        let catalog = catalog();
        let normalizer = Normalizer::new(&catalog);
        let (name, unit, _) = case;
        let entry = catalog.get(name).unwrap();
        let (once, canonical) = normalizer.normalize(entry, magnitude, unit).unwrap();
        let (twice, again) = normalizer.normalize(entry, once, canonical.name()).unwrap();
        prop_assert_eq!(canonical.name(), again.name());
        prop_assert!(close(once, twice), "{} != {}", once, twice);
    }

    #[test]
    fn normalization_agrees_across_units(
        magnitude in 0.0f64..1e6,
        case in proptest::sample::select(SAME_DIMENSION),
    ) {
        let catalog = catalog();
        let normalizer = Normalizer::new(&catalog);
        let (name, from, to) = case;
        let entry = catalog.get(name).unwrap();
        let converted = catalog.registry().convert(magnitude, from, to).unwrap();
        let (direct, direct_unit) = normalizer.normalize(entry, magnitude, from).unwrap();
        let (via, via_unit) = normalizer.normalize(entry, converted, to).unwrap();
        prop_assert_eq!(direct_unit.name(), via_unit.name());
        prop_assert!(close(direct, via), "{} != {}", direct, via);
    }
}
