use pkdb_model::{MeasurementType, MeasurementTypeCatalog, Record, RecordField, Violation};
use pkdb_units::Unit;
use tracing::trace;

/// Converts magnitudes and records to the canonical units of a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    catalog: &'a MeasurementTypeCatalog,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a MeasurementTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Convert `magnitude` in `unit` to the canonical unit for the unit's
    /// dimension.
    pub fn normalize<'e>(
        &self,
        entry: &'e MeasurementType,
        magnitude: f64,
        unit: &str,
    ) -> Result<(f64, &'e Unit), Violation> {
        let canonical = self.catalog.canonical_unit_for(entry, unit)?;
        let factor = self.factor(unit, canonical)?;
        trace!(
            measurement_type = entry.name(),
            unit,
            canonical = canonical.name(),
            factor,
            "normalize"
        );
        Ok((magnitude * factor, canonical))
    }

    /// Convert the unit-carrying statistical fields of `record` and rewrite its
    /// unit. `cv` is a ratio and stays as is. Records without a unit are
    /// returned unchanged.
    pub fn normalize_record(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<Record, Violation> {
        let Some(unit) = record.unit() else {
            return Ok(record.clone());
        };
        let canonical = self.catalog.canonical_unit_for(entry, unit)?;
        let factor = self.factor(unit, canonical)?;

        let mut normalized = record.clone();
        normalized.map_scaled_stats(|value| value * factor);
        normalized.unit = Some(canonical.name().to_string());
        Ok(normalized)
    }

    /// Whether `unit` needs no conversion for `entry`.
    pub fn is_normalized(&self, entry: &MeasurementType, unit: &str) -> Result<bool, Violation> {
        self.catalog
            .is_canonical_unit(entry, unit)
            .map_err(|error| Violation::from_unit_error(RecordField::Unit, error))
    }

    fn factor(&self, unit: &str, canonical: &Unit) -> Result<f64, Violation> {
        self.catalog
            .registry()
            .convert(1.0, unit, canonical.name())
            .map_err(|error| Violation::from_unit_error(RecordField::Unit, error))
    }
}
