//! Incoming measurement records.

use serde::{Deserialize, Serialize};

use crate::enums::RecordField;

/// A statistical value: a scalar, a time series, or anything else the
/// ingestion layer passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Scalar(f64),
    Series(Vec<f64>),
    Other(serde_json::Value),
}

impl StatValue {
    /// True if the value is a negative scalar or a series with a negative
    /// element. Other shapes never count as negative.
    pub fn has_negative(&self) -> bool {
        match self {
            StatValue::Scalar(value) => *value < 0.0,
            StatValue::Series(values) => values.iter().any(|value| *value < 0.0),
            StatValue::Other(_) => false,
        }
    }

    /// Apply `f` to every number. Other shapes are returned unchanged.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> StatValue {
        match self {
            StatValue::Scalar(value) => StatValue::Scalar(f(*value)),
            StatValue::Series(values) => StatValue::Series(values.iter().map(|v| f(*v)).collect()),
            StatValue::Other(value) => StatValue::Other(value.clone()),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        StatValue::Scalar(value)
    }
}

impl From<Vec<f64>> for StatValue {
    fn from(values: Vec<f64>) -> Self {
        StatValue::Series(values)
    }
}

/// One measurement submission.
///
/// Blank `unit`, `time_unit` and `choice` strings count as absent; use the
/// accessors rather than the fields when checking presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub se: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<StatValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_time_unit(mut self, unit: impl Into<String>) -> Self {
        self.time_unit = Some(unit.into());
        self
    }

    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<StatValue>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set a statistical field. Non-statistical fields are ignored.
    pub fn with_stat(mut self, field: RecordField, value: impl Into<StatValue>) -> Self {
        if let Some(slot) = self.stat_slot(field) {
            *slot = Some(value.into());
        }
        self
    }

    pub fn unit(&self) -> Option<&str> {
        non_blank(self.unit.as_deref())
    }

    pub fn time_unit(&self) -> Option<&str> {
        non_blank(self.time_unit.as_deref())
    }

    pub fn choice(&self) -> Option<&str> {
        non_blank(self.choice.as_deref())
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    pub fn stat(&self, field: RecordField) -> Option<&StatValue> {
        match field {
            RecordField::Value => self.value.as_ref(),
            RecordField::Mean => self.mean.as_ref(),
            RecordField::Median => self.median.as_ref(),
            RecordField::Min => self.min.as_ref(),
            RecordField::Max => self.max.as_ref(),
            RecordField::Sd => self.sd.as_ref(),
            RecordField::Se => self.se.as_ref(),
            RecordField::Cv => self.cv.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn stat_slot(&mut self, field: RecordField) -> Option<&mut Option<StatValue>> {
        match field {
            RecordField::Value => Some(&mut self.value),
            RecordField::Mean => Some(&mut self.mean),
            RecordField::Median => Some(&mut self.median),
            RecordField::Min => Some(&mut self.min),
            RecordField::Max => Some(&mut self.max),
            RecordField::Sd => Some(&mut self.sd),
            RecordField::Se => Some(&mut self.se),
            RecordField::Cv => Some(&mut self.cv),
            _ => None,
        }
    }

    /// Present statistical fields in record order.
    pub fn stats(&self) -> impl Iterator<Item = (RecordField, &StatValue)> {
        RecordField::STATISTICS
            .into_iter()
            .filter_map(|field| self.stat(field).map(|value| (field, value)))
    }

    /// Rewrite every statistical field that scales with the unit.
    pub fn map_scaled_stats(&mut self, f: impl Fn(f64) -> f64) {
        for field in RecordField::STATISTICS {
            if !field.scales_with_unit() {
                continue;
            }
            if let Some(Some(value)) = self.stat_slot(field) {
                *value = value.map(&f);
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
