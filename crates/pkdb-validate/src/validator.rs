use pkdb_model::{MeasurementType, MeasurementTypeCatalog, Record, Violation, Violations};
use tracing::debug;

use crate::checks;
use crate::options::{ValidationMode, ValidationOptions};

/// Validates records against the measurement types of one catalog.
///
/// Holds only a borrow of the catalog and its options; clone or copy freely
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    catalog: &'a MeasurementTypeCatalog,
    options: ValidationOptions,
}

impl<'a> Validator<'a> {
    pub fn new(catalog: &'a MeasurementTypeCatalog) -> Self {
        Self {
            catalog,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn catalog(&self) -> &'a MeasurementTypeCatalog {
        self.catalog
    }

    /// Run every check in order: unit, numeric sign, choice, time unit, time
    /// requirement.
    ///
    /// In fail-fast mode the first failing check ends validation; that check
    /// still reports all it found (both missing time fields, every negative
    /// field). In aggregate mode all checks run.
    pub fn validate_complete(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violations> {
        let steps: [(&str, &dyn Fn() -> Vec<Violation>); 5] = [
            ("unit", &|| checks::unit::check(self.catalog, entry, record)),
            ("numeric", &|| checks::numeric::check(entry, record)),
            ("choice", &|| checks::choice::check(entry, record)),
            ("time_unit", &|| {
                checks::time::check_time_unit(self.catalog.registry(), record)
            }),
            ("time_required", &|| {
                checks::time::check_time_required(entry, record)
            }),
        ];
        self.run(entry, &steps)
    }

    /// Unit and time-unit checks only, for records whose values are not yet
    /// known.
    pub fn validate_units(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violations> {
        let steps: [(&str, &dyn Fn() -> Vec<Violation>); 2] = [
            ("unit", &|| checks::unit::check(self.catalog, entry, record)),
            ("time_unit", &|| {
                checks::time::check_time_unit(self.catalog.registry(), record)
            }),
        ];
        self.run(entry, &steps)
    }

    /// Look the type up by name, synonym or slug, then validate.
    pub fn validate_named(
        &self,
        measurement_type: &str,
        record: &Record,
    ) -> Result<(), Violations> {
        let entry = self.catalog.lookup(measurement_type)?;
        self.validate_complete(entry, record)
    }

    pub fn validate_unit(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violation> {
        first(checks::unit::check(self.catalog, entry, record))
    }

    pub fn validate_numeric(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violation> {
        first(checks::numeric::check(entry, record))
    }

    pub fn validate_choice(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violation> {
        first(checks::choice::check(entry, record))
    }

    pub fn validate_time_unit(&self, record: &Record) -> Result<(), Violation> {
        first(checks::time::check_time_unit(self.catalog.registry(), record))
    }

    pub fn validate_time_required(
        &self,
        entry: &MeasurementType,
        record: &Record,
    ) -> Result<(), Violations> {
        Violations::new(checks::time::check_time_required(entry, record)).map_or(Ok(()), Err)
    }

    fn run(
        &self,
        entry: &MeasurementType,
        steps: &[(&str, &dyn Fn() -> Vec<Violation>)],
    ) -> Result<(), Violations> {
        let mut found = Vec::new();
        for (step, check) in steps {
            let violations = check();
            if violations.is_empty() {
                continue;
            }
            debug!(
                measurement_type = entry.name(),
                step,
                violations = violations.len(),
                "check failed"
            );
            found.extend(violations);
            if self.options.mode == ValidationMode::FailFast {
                break;
            }
        }
        Violations::new(found).map_or(Ok(()), Err)
    }
}

fn first(violations: Vec<Violation>) -> Result<(), Violation> {
    violations.into_iter().next().map_or(Ok(()), Err)
}
