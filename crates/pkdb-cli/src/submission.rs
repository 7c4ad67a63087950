//! Submission files and the report produced by validating them.

use pkdb_model::{MeasurementTypeCatalog, Record, Violation, ViolationPayload, Violations};
use pkdb_normalize::Normalizer;
use pkdb_validate::{ValidationOptions, Validator};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::logging::redact_value;

/// One entry of a submission file: a measurement type plus the record
/// fields, side by side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    pub measurement_type: String,
    #[serde(flatten)]
    pub record: Record,
}

/// Parse a JSON array of submissions.
pub fn parse_submissions(contents: &str) -> serde_json::Result<Vec<Submission>> {
    serde_json::from_str(contents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedViolation {
    pub code: &'static str,
    #[serde(flatten)]
    pub payload: ViolationPayload,
}

impl From<&Violation> for ReportedViolation {
    fn from(violation: &Violation) -> Self {
        Self {
            code: violation.code(),
            payload: violation.payload(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub index: usize,
    pub measurement_type: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ReportedViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub accepted: usize,
    pub rejected: usize,
    pub records: Vec<RecordOutcome>,
}

impl ValidationReport {
    pub fn has_rejections(&self) -> bool {
        self.rejected > 0
    }
}

/// How submissions are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckSettings {
    pub options: ValidationOptions,
    /// Convert accepted records into canonical units.
    pub normalize: bool,
}

/// Validate every submission and collect the outcomes in file order.
pub fn check_submissions(
    catalog: &MeasurementTypeCatalog,
    submissions: &[Submission],
    settings: CheckSettings,
) -> ValidationReport {
    let validator = Validator::new(catalog).with_options(settings.options);
    let normalizer = Normalizer::new(catalog);
    let mut records = Vec::with_capacity(submissions.len());
    for (index, submission) in submissions.iter().enumerate() {
        let checked = validator
            .validate_named(&submission.measurement_type, &submission.record)
            .and_then(|()| {
                if !settings.normalize {
                    return Ok(None);
                }
                let entry = catalog.lookup(&submission.measurement_type)?;
                let normalized = normalizer.normalize_record(entry, &submission.record)?;
                Ok(Some(normalized))
            });
        let outcome = match checked {
            Ok(normalized) => RecordOutcome {
                index,
                measurement_type: submission.measurement_type.clone(),
                status: Status::Accepted,
                violations: Vec::new(),
                normalized,
            },
            Err(violations) => {
                log_rejection(index, submission, &violations);
                RecordOutcome {
                    index,
                    measurement_type: submission.measurement_type.clone(),
                    status: Status::Rejected,
                    violations: violations.iter().map(ReportedViolation::from).collect(),
                    normalized: None,
                }
            }
        };
        records.push(outcome);
    }
    let rejected = records
        .iter()
        .filter(|outcome| outcome.status == Status::Rejected)
        .count();
    info!(submissions = records.len(), rejected, "validated submissions");
    ValidationReport {
        accepted: records.len() - rejected,
        rejected,
        records,
    }
}

fn log_rejection(index: usize, submission: &Submission, violations: &Violations) {
    let record = serde_json::to_string(&submission.record).unwrap_or_default();
    warn!(
        index,
        measurement_type = %submission.measurement_type,
        record = redact_value(&record),
        first = violations.first().code(),
        violations = violations.len(),
        "submission rejected"
    );
}
