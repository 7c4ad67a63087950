//! Record rejections.
//!
//! Every check returns a [`Violation`] naming the offending field. Messages
//! are shown to curators as-is and must stay stable.

use std::fmt;

use pkdb_units::{Dimension, UnitError};
use serde::{Deserialize, Serialize};

use crate::enums::{DataKind, RecordField};

/// A single reason a record was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    // Unit resolution
    /// Unit string is not known to the registry.
    UnitUndefined { field: RecordField, unit: String },
    /// `%` was used instead of `percent`.
    PercentNotAllowed { field: RecordField },
    /// Two units of different dimension were asked to convert.
    IncompatibleDimensions {
        field: RecordField,
        from: String,
        from_dimension: Dimension,
        to: String,
        to_dimension: Dimension,
    },

    // Unit policy
    /// Unit missing, superfluous, or of a dimension the type does not allow.
    UnitNotAllowed {
        measurement_type: String,
        unit: Option<String>,
        dimension: Option<Dimension>,
        allowed_dimensions: Vec<Dimension>,
        allowed_units: Vec<String>,
    },
    /// Unit has no canonical counterpart for this type.
    DimensionNotSupported {
        measurement_type: String,
        unit: String,
        dimension: Dimension,
        allowed_dimensions: Vec<Dimension>,
    },

    // Values
    /// Statistical field is negative.
    NegativeValueNotAllowed {
        measurement_type: String,
        field: RecordField,
    },

    // Choices
    /// Choice not in the allowed list, or a choice given for a numeric type.
    ChoiceNotAllowed {
        measurement_type: String,
        data_kind: DataKind,
        choice: String,
        allowed_choices: Vec<String>,
    },
    /// Choice absent although the type has choices.
    ChoiceRequired {
        measurement_type: String,
        allowed_choices: Vec<String>,
    },

    // Time
    /// Time unit is not of the time dimension.
    InvalidTimeUnit { unit: String, dimension: Dimension },
    /// Required field missing.
    MissingRequiredField {
        measurement_type: String,
        field: RecordField,
    },

    // Catalog
    /// No measurement type with this name.
    UnknownMeasurementType { name: String },
}

impl Violation {
    /// Lift a unit error onto the record field that carried the unit.
    pub fn from_unit_error(field: RecordField, error: UnitError) -> Self {
        match error {
            UnitError::Undefined { unit } => Violation::UnitUndefined { field, unit },
            UnitError::PercentNotAllowed => Violation::PercentNotAllowed { field },
            UnitError::IncompatibleDimensions {
                from,
                from_dimension,
                to,
                to_dimension,
            } => Violation::IncompatibleDimensions {
                field,
                from,
                from_dimension,
                to,
                to_dimension,
            },
        }
    }

    /// The unit error behind a unit-resolution violation; its wording is the
    /// violation message.
    pub fn unit_error(&self) -> Option<UnitError> {
        match self {
            Violation::UnitUndefined { unit, .. } => {
                Some(UnitError::Undefined { unit: unit.clone() })
            }
            Violation::PercentNotAllowed { .. } => Some(UnitError::PercentNotAllowed),
            Violation::IncompatibleDimensions {
                from,
                from_dimension,
                to,
                to_dimension,
                ..
            } => Some(UnitError::IncompatibleDimensions {
                from: from.clone(),
                from_dimension: from_dimension.clone(),
                to: to.clone(),
                to_dimension: to_dimension.clone(),
            }),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::UnitUndefined { .. } => "unit_undefined",
            Violation::PercentNotAllowed { .. } => "percent_not_allowed",
            Violation::IncompatibleDimensions { .. } => "incompatible_dimensions",
            Violation::UnitNotAllowed { .. } => "unit_not_allowed",
            Violation::DimensionNotSupported { .. } => "dimension_not_supported",
            Violation::NegativeValueNotAllowed { .. } => "negative_value_not_allowed",
            Violation::ChoiceNotAllowed { .. } => "choice_not_allowed",
            Violation::ChoiceRequired { .. } => "choice_required",
            Violation::InvalidTimeUnit { .. } => "invalid_time_unit",
            Violation::MissingRequiredField { .. } => "missing_required_field",
            Violation::UnknownMeasurementType { .. } => "unknown_measurement_type",
        }
    }

    /// The record field the violation is reported against.
    pub fn field(&self) -> RecordField {
        match self {
            Violation::UnitUndefined { field, .. } => *field,
            Violation::PercentNotAllowed { field } => *field,
            Violation::IncompatibleDimensions { field, .. } => *field,
            Violation::UnitNotAllowed { .. } => RecordField::Unit,
            Violation::DimensionNotSupported { .. } => RecordField::Unit,
            Violation::NegativeValueNotAllowed { field, .. } => *field,
            Violation::ChoiceNotAllowed { .. } => RecordField::Choice,
            Violation::ChoiceRequired { .. } => RecordField::Choice,
            Violation::InvalidTimeUnit { .. } => RecordField::TimeUnit,
            Violation::MissingRequiredField { field, .. } => *field,
            Violation::UnknownMeasurementType { .. } => RecordField::MeasurementType,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Violation::UnitUndefined { .. }
            | Violation::PercentNotAllowed { .. }
            | Violation::IncompatibleDimensions { .. } => self
                .unit_error()
                .map(|error| error.to_string())
                .unwrap_or_default(),
            Violation::UnitNotAllowed {
                measurement_type,
                unit,
                dimension,
                allowed_units,
                ..
            } => match (unit, dimension) {
                (Some(unit), _) if allowed_units.is_empty() => format!(
                    "For measurement type `{measurement_type}` no unit is allowed, \
                     but the unit [{unit}] was given."
                ),
                (Some(unit), Some(dimension)) => format!(
                    "For measurement type `{measurement_type}` the unit [{unit}] \
                     with dimension {dimension} is not allowed."
                ),
                (Some(unit), None) => format!(
                    "For measurement type `{measurement_type}` the unit [{unit}] is not allowed."
                ),
                (None, _) => {
                    format!("For measurement type `{measurement_type}` a unit is required.")
                }
            },
            Violation::DimensionNotSupported {
                measurement_type,
                unit,
                dimension,
                ..
            } => format!(
                "Dimension {dimension} is not allowed for measurement type \
                 [{measurement_type}]. Dimension was calculated from unit [{unit}]."
            ),
            Violation::NegativeValueNotAllowed {
                measurement_type,
                field,
            } => format!(
                "Numeric values need to be positive (>=0) for measurement type \
                 `{measurement_type}`, but `{field}` is negative."
            ),
            Violation::ChoiceNotAllowed {
                measurement_type,
                data_kind,
                choice,
                allowed_choices,
            } => {
                if data_kind.accepts_choice() {
                    format!(
                        "The choice `{choice}` is not a valid choice for measurement type \
                         `{measurement_type}`. Allowed choices are: `{allowed_choices:?}`."
                    )
                } else {
                    format!(
                        "The field `choice` is not allowed for measurement type \
                         `{measurement_type}`. For numerical values the fields `value`, \
                         `mean` or `median` are used. For encoding substances use the \
                         `substance` field."
                    )
                }
            }
            Violation::ChoiceRequired {
                measurement_type,
                allowed_choices,
            } => format!(
                "A choice is required for `{measurement_type}`. \
                 Allowed choices are: `{allowed_choices:?}`."
            ),
            Violation::InvalidTimeUnit { unit, dimension } => {
                format!("[{unit}] with dimension {dimension} is not allowed for the time units.")
            }
            Violation::MissingRequiredField {
                measurement_type,
                field,
            } => format!(
                "The field `{field}` is required for measurement type `{measurement_type}`."
            ),
            Violation::UnknownMeasurementType { name } => {
                format!("Measurement type `{name}` does not exist.")
            }
        }
    }

    /// Dimensions a unit violation would have accepted.
    pub fn allowed_dimensions(&self) -> &[Dimension] {
        match self {
            Violation::UnitNotAllowed {
                allowed_dimensions, ..
            }
            | Violation::DimensionNotSupported {
                allowed_dimensions, ..
            } => allowed_dimensions,
            _ => &[],
        }
    }

    /// Payload surfaced to the submitter.
    pub fn payload(&self) -> ViolationPayload {
        let normalized_units = match self {
            Violation::UnitNotAllowed { allowed_units, .. } => allowed_units.clone(),
            _ => Vec::new(),
        };
        ViolationPayload {
            field: self.field().as_str().to_string(),
            message: self.message(),
            allowed_dimensions: self
                .allowed_dimensions()
                .iter()
                .map(ToString::to_string)
                .collect(),
            normalized_units,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Violation {}

/// Field, message and unit hints for one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationPayload {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_dimensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normalized_units: Vec<String>,
}

/// One or more violations of a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// `None` if `violations` is empty.
    pub fn new(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self(violations))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &Violation {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<RecordField> {
        self.0.iter().map(Violation::field).collect()
    }

    pub fn payloads(&self) -> Vec<ViolationPayload> {
        self.0.iter().map(Violation::payload).collect()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field(), violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_errors_keep_their_field() {
        let violation = Violation::from_unit_error(
            RecordField::TimeUnit,
            UnitError::Undefined {
                unit: "fortnight".to_string(),
            },
        );
        assert_eq!(violation.field(), RecordField::TimeUnit);
        assert_eq!(violation.code(), "unit_undefined");
        assert_eq!(
            violation.to_string(),
            "unit [fortnight] is not defined in unit registry or not allowed."
        );
    }

    #[test]
    fn unit_violations_share_the_unit_error_wording() {
        let error = UnitError::IncompatibleDimensions {
            from: "ml".to_string(),
            from_dimension: Dimension::base("length").pow(3),
            to: "kg".to_string(),
            to_dimension: Dimension::base("mass"),
        };
        let violation = Violation::from_unit_error(RecordField::Unit, error.clone());
        assert_eq!(violation.to_string(), error.to_string());
        assert_eq!(violation.unit_error(), Some(error));
        insta::assert_snapshot!(
            violation,
            @"unit [ml] with dimension [length] ** 3 cannot be converted to [kg] with dimension [mass]"
        );
        assert_eq!(
            Violation::ChoiceRequired {
                measurement_type: "sex".to_string(),
                allowed_choices: vec![],
            }
            .unit_error(),
            None
        );
    }

    #[test]
    fn percent_message_points_to_percent() {
        let violation = Violation::from_unit_error(RecordField::Unit, UnitError::PercentNotAllowed);
        insta::assert_snapshot!(violation, @"unit [%] has to be written as 'percent'");
    }

    #[test]
    fn unit_not_allowed_messages() {
        let superfluous = Violation::UnitNotAllowed {
            measurement_type: "sex".to_string(),
            unit: Some("kg".to_string()),
            dimension: Some(Dimension::base("mass")),
            allowed_dimensions: vec![],
            allowed_units: vec![],
        };
        insta::assert_snapshot!(
            superfluous,
            @"For measurement type `sex` no unit is allowed, but the unit [kg] was given."
        );

        let missing = Violation::UnitNotAllowed {
            measurement_type: "weight".to_string(),
            unit: None,
            dimension: None,
            allowed_dimensions: vec![Dimension::base("mass")],
            allowed_units: vec!["kg".to_string()],
        };
        insta::assert_snapshot!(missing, @"For measurement type `weight` a unit is required.");
    }

    #[test]
    fn payload_lists_unit_hints_only_for_unit_violations() {
        let violation = Violation::UnitNotAllowed {
            measurement_type: "weight".to_string(),
            unit: Some("ml".to_string()),
            dimension: Some(Dimension::base("length").pow(3)),
            allowed_dimensions: vec![Dimension::base("mass")],
            allowed_units: vec!["kg".to_string()],
        };
        insta::assert_json_snapshot!(violation.payload(), @r#"
        {
          "field": "unit",
          "message": "For measurement type `weight` the unit [ml] with dimension [length] ** 3 is not allowed.",
          "allowed_dimensions": [
            "[mass]"
          ],
          "normalized_units": [
            "kg"
          ]
        }
        "#);

        let choice = Violation::ChoiceRequired {
            measurement_type: "sex".to_string(),
            allowed_choices: vec!["male".to_string(), "female".to_string()],
        };
        let json = serde_json::to_value(choice.payload()).unwrap();
        assert_eq!(json["field"], "choice");
        assert!(json.get("allowed_dimensions").is_none());
        assert!(json.get("normalized_units").is_none());
    }

    #[test]
    fn violations_are_never_empty() {
        assert!(Violations::new(Vec::new()).is_none());
        let violations = Violations::new(vec![
            Violation::MissingRequiredField {
                measurement_type: "auc_end".to_string(),
                field: RecordField::Time,
            },
            Violation::MissingRequiredField {
                measurement_type: "auc_end".to_string(),
                field: RecordField::TimeUnit,
            },
        ])
        .unwrap();
        assert_eq!(violations.fields(), [RecordField::Time, RecordField::TimeUnit]);
        assert_eq!(
            violations.to_string(),
            "time: The field `time` is required for measurement type `auc_end`.; \
             time_unit: The field `time_unit` is required for measurement type `auc_end`."
        );
    }
}
