//! Validator configuration.

use serde::{Deserialize, Serialize};

/// How many violations a validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop after the first check that fails.
    #[default]
    FailFast,
    /// Run every check and report everything found.
    Aggregate,
}

/// Options controlling record validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub mode: ValidationMode,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn aggregate() -> Self {
        Self::new().with_mode(ValidationMode::Aggregate)
    }

    pub fn is_fail_fast(&self) -> bool {
        self.mode == ValidationMode::FailFast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fail_fast() {
        assert!(ValidationOptions::default().is_fail_fast());
        assert!(!ValidationOptions::aggregate().is_fail_fast());
        let json = serde_json::to_string(&ValidationOptions::aggregate()).unwrap();
        assert_eq!(json, r#"{"mode":"aggregate"}"#);
    }
}
