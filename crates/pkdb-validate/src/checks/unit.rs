//! Unit check.
//!
//! The record's unit must resolve and match one of the dimensions the
//! measurement type allows. Types without units accept no unit; types that
//! list `NO_UNIT` accept an absent unit.

use pkdb_model::{MeasurementType, MeasurementTypeCatalog, Record, RecordField, Violation};
use tracing::trace;

/// Check the record's unit against the measurement type.
pub fn check(
    catalog: &MeasurementTypeCatalog,
    entry: &MeasurementType,
    record: &Record,
) -> Vec<Violation> {
    let unit = record.unit();
    let valid = match catalog.is_valid_unit(entry, unit) {
        Ok(valid) => valid,
        Err(error) => return vec![Violation::from_unit_error(RecordField::Unit, error)],
    };
    trace!(measurement_type = entry.name(), ?unit, valid, "unit check");
    if valid {
        return Vec::new();
    }

    let dimension = unit.and_then(|unit| catalog.registry().dimension_of(unit).ok());
    vec![Violation::UnitNotAllowed {
        measurement_type: entry.name().to_string(),
        unit: unit.map(str::to_string),
        dimension,
        allowed_dimensions: entry.allowed_dimensions().into_iter().cloned().collect(),
        allowed_units: entry
            .canonical_units()
            .into_iter()
            .map(|unit| unit.name().to_string())
            .collect(),
    }]
}
