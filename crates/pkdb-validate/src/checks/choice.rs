//! Choice check.

use pkdb_model::{MeasurementType, Record, Violation};

/// A given choice must be allowed for the data kind and listed by the type.
/// A missing choice is an error whenever the type lists choices.
pub fn check(entry: &MeasurementType, record: &Record) -> Vec<Violation> {
    match record.choice() {
        Some(choice) => {
            if entry.data_kind().accepts_choice() && entry.is_valid_choice(choice) {
                return Vec::new();
            }
            vec![Violation::ChoiceNotAllowed {
                measurement_type: entry.name().to_string(),
                data_kind: entry.data_kind(),
                choice: choice.to_string(),
                allowed_choices: entry.choices().to_vec(),
            }]
        }
        None if !entry.choices().is_empty() => vec![Violation::ChoiceRequired {
            measurement_type: entry.name().to_string(),
            allowed_choices: entry.choices().to_vec(),
        }],
        None => Vec::new(),
    }
}
