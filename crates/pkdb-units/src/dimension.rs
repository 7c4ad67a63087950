//! Physical dimensions as products of powers of named base dimensions.
//!
//! The SI base quantities are represented by name (`length`, `mass`, `time`,
//! `substance`, `temperature`, `current`, `luminosity`), and definitions such
//! as `IU = [activity_amount]` introduce further base dimensions at registry
//! build time. Two units are interconvertible iff their dimensions are equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Name of the time base dimension.
pub const TIME: &str = "time";

/// A dimension, stored as base-dimension name -> non-zero exponent.
///
/// Zero exponents are never stored, so structural equality is dimensional
/// equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimension(BTreeMap<String, i32>);

impl Dimension {
    /// The empty product (pure number).
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single base dimension raised to the first power.
    pub fn base(name: &str) -> Self {
        let mut exponents = BTreeMap::new();
        exponents.insert(name.to_string(), 1);
        Self(exponents)
    }

    /// The `[time]` dimension.
    pub fn time() -> Self {
        Self::base(TIME)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    /// Exponent of a base dimension (0 when absent).
    pub fn exponent(&self, base: &str) -> i32 {
        self.0.get(base).copied().unwrap_or(0)
    }

    /// Multiply dimensions (add exponents).
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut exponents = self.0.clone();
        for (base, exponent) in &other.0 {
            *exponents.entry(base.clone()).or_insert(0) += exponent;
        }
        Self::pruned(exponents)
    }

    /// Divide dimensions (subtract exponents).
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.multiply(&other.pow(-1))
    }

    /// Raise to an integer power (multiply exponents).
    pub fn pow(&self, power: i32) -> Dimension {
        let exponents = self
            .0
            .iter()
            .map(|(base, exponent)| (base.clone(), exponent * power))
            .collect();
        Self::pruned(exponents)
    }

    fn pruned(mut exponents: BTreeMap<String, i32>) -> Self {
        exponents.retain(|_, exponent| *exponent != 0);
        Self(exponents)
    }
}

/// Renders as `[mass] / [length] ** 3`, `1 / [time]` or `dimensionless`.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }
        let numerator: Vec<String> = self
            .0
            .iter()
            .filter(|(_, exponent)| **exponent > 0)
            .map(|(base, exponent)| format_power(base, *exponent))
            .collect();
        let denominator: Vec<String> = self
            .0
            .iter()
            .filter(|(_, exponent)| **exponent < 0)
            .map(|(base, exponent)| format_power(base, -exponent))
            .collect();
        if numerator.is_empty() {
            f.write_str("1")?;
        } else {
            f.write_str(&numerator.join(" * "))?;
        }
        for term in denominator {
            write!(f, " / {term}")?;
        }
        Ok(())
    }
}

fn format_power(base: &str, exponent: i32) -> String {
    if exponent == 1 {
        format!("[{base}]")
    } else {
        format!("[{base}] ** {exponent}")
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
