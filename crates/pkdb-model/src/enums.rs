//! Enumerations shared by measurement types, records and violations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Shape of the values a measurement type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Numbers in the statistical fields, no choice.
    Numeric,
    /// A choice from a fixed list.
    #[serde(alias = "categorial")]
    Categorical,
    /// A yes/no style choice.
    Boolean,
    /// Numbers, a choice, or both.
    #[serde(alias = "numeric_categorial")]
    NumericCategorical,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Numeric => "numeric",
            DataKind::Categorical => "categorical",
            DataKind::Boolean => "boolean",
            DataKind::NumericCategorical => "numeric_categorical",
        }
    }

    /// Statistical fields are sign checked for these kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataKind::Numeric | DataKind::NumericCategorical)
    }

    /// A `choice` may only be supplied for these kinds.
    pub fn accepts_choice(&self) -> bool {
        !matches!(self, DataKind::Numeric)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" => Ok(DataKind::Numeric),
            "categorical" | "categorial" => Ok(DataKind::Categorical),
            "boolean" => Ok(DataKind::Boolean),
            "numeric_categorical" | "numeric_categorial" => Ok(DataKind::NumericCategorical),
            _ => Err(ModelError::UnknownDataKind(s.to_string())),
        }
    }
}

/// Field of a record, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    MeasurementType,
    Unit,
    TimeUnit,
    Choice,
    Time,
    Value,
    Mean,
    Median,
    Min,
    Max,
    Sd,
    Se,
    Cv,
}

impl RecordField {
    /// Statistical value fields in record order.
    pub const STATISTICS: [RecordField; 8] = [
        RecordField::Value,
        RecordField::Mean,
        RecordField::Median,
        RecordField::Min,
        RecordField::Max,
        RecordField::Sd,
        RecordField::Se,
        RecordField::Cv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::MeasurementType => "measurement_type",
            RecordField::Unit => "unit",
            RecordField::TimeUnit => "time_unit",
            RecordField::Choice => "choice",
            RecordField::Time => "time",
            RecordField::Value => "value",
            RecordField::Mean => "mean",
            RecordField::Median => "median",
            RecordField::Min => "min",
            RecordField::Max => "max",
            RecordField::Sd => "sd",
            RecordField::Se => "se",
            RecordField::Cv => "cv",
        }
    }

    /// True for fields carried in the record's unit. `cv` is a ratio.
    pub fn scales_with_unit(&self) -> bool {
        matches!(
            self,
            RecordField::Value
                | RecordField::Mean
                | RecordField::Median
                | RecordField::Min
                | RecordField::Max
                | RecordField::Sd
                | RecordField::Se
        )
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
