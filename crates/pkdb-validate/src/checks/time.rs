//! Time unit and time requirement checks.

use pkdb_model::{MeasurementType, Record, RecordField, Violation};
use pkdb_units::UnitRegistry;

/// A given time unit must resolve to the time dimension.
pub fn check_time_unit(registry: &UnitRegistry, record: &Record) -> Vec<Violation> {
    let Some(time_unit) = record.time_unit() else {
        return Vec::new();
    };
    match registry.resolve(time_unit) {
        Ok(unit) if *unit.dimension() == registry.time_dimension() => Vec::new(),
        Ok(unit) => vec![Violation::InvalidTimeUnit {
            unit: unit.name().to_string(),
            dimension: unit.dimension().clone(),
        }],
        Err(error) => vec![Violation::from_unit_error(RecordField::TimeUnit, error)],
    }
}

/// Types that require time need both `time` and `time_unit`.
pub fn check_time_required(entry: &MeasurementType, record: &Record) -> Vec<Violation> {
    if !entry.requires_time() {
        return Vec::new();
    }
    let mut violations = Vec::new();
    if !record.has_time() {
        violations.push(missing(entry, RecordField::Time));
    }
    if record.time_unit().is_none() {
        violations.push(missing(entry, RecordField::TimeUnit));
    }
    violations
}

fn missing(entry: &MeasurementType, field: RecordField) -> Violation {
    Violation::MissingRequiredField {
        measurement_type: entry.name().to_string(),
        field,
    }
}
