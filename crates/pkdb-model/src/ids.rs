use std::fmt;

use crate::ModelError;

/// Identifier of the info node describing a measurement type.
///
/// Only a reference: the catalog never owns info nodes.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct InfoNodeId(String);

impl InfoNodeId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidInfoNodeId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InfoNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(InfoNodeId::new(" weight ").unwrap().as_str(), "weight");
        assert!(matches!(
            InfoNodeId::new("  "),
            Err(ModelError::InvalidInfoNodeId(_))
        ));
    }
}
