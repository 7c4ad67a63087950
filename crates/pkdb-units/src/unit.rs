use std::fmt;

use serde::Serialize;

use crate::dimension::Dimension;

/// A resolved unit: the expression it was resolved from, its dimension and
/// its factor against the registry reference scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    name: String,
    dimension: Dimension,
    #[serde(skip)]
    scale: f64,
}

impl Unit {
    pub(crate) fn new(name: impl Into<String>, dimension: Dimension, scale: f64) -> Self {
        Self {
            name: name.into(),
            dimension,
            scale,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// Factor against the registry reference scale. Only ratios of scales
    /// are meaningful.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Check if units are dimensionally compatible.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Multiplier taking a magnitude in `self` to a magnitude in `other`.
    pub fn conversion_factor_to(&self, other: &Unit) -> Option<f64> {
        self.is_compatible(other).then(|| self.scale / other.scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
