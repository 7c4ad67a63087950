//! Numeric sign check.
//!
//! Applies to numeric and numeric-categorical types that cannot be negative.
//! Scalars must be >= 0 and so must every element of a series. Any other
//! shape passes.

use pkdb_model::{MeasurementType, Record, Violation};

/// Report every statistical field holding a negative number.
pub fn check(entry: &MeasurementType, record: &Record) -> Vec<Violation> {
    if !entry.data_kind().is_numeric() || entry.can_be_negative() {
        return Vec::new();
    }
    record
        .stats()
        .filter(|(_, value)| value.has_negative())
        .map(|(field, _)| Violation::NegativeValueNotAllowed {
            measurement_type: entry.name().to_string(),
            field,
        })
        .collect()
}
