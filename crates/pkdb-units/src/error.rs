use crate::dimension::Dimension;

/// Failure to resolve or convert a unit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("unit [{unit}] is not defined in unit registry or not allowed.")]
    Undefined { unit: String },

    #[error("unit [%] has to be written as 'percent'")]
    PercentNotAllowed,

    #[error(
        "unit [{from}] with dimension {from_dimension} cannot be converted to \
         [{to}] with dimension {to_dimension}"
    )]
    IncompatibleDimensions {
        from: String,
        from_dimension: Dimension,
        to: String,
        to_dimension: Dimension,
    },
}

impl UnitError {
    pub(crate) fn undefined(unit: impl Into<String>) -> Self {
        Self::Undefined { unit: unit.into() }
    }
}

/// Failure to add a definition while building a registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("invalid unit definition `{definition}`: {message}")]
    Invalid { definition: String, message: String },

    #[error("unit `{name}` is already defined")]
    Redefinition { name: String },
}

impl DefinitionError {
    pub(crate) fn invalid(definition: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            definition: definition.to_string(),
            message: message.into(),
        }
    }
}
