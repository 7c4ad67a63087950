use pkdb_units::UnitError;
use thiserror::Error;

/// Errors raised while building measurement types and the catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid info node id: {0:?}")]
    InvalidInfoNodeId(String),

    #[error("unknown data kind: {0}")]
    UnknownDataKind(String),

    #[error("measurement type name must not be empty")]
    EmptyName,

    #[error("duplicate measurement type: {name}")]
    DuplicateMeasurementType { name: String },

    #[error("synonym `{synonym}` of `{name}` is already used by `{existing}`")]
    DuplicateSynonym {
        synonym: String,
        name: String,
        existing: String,
    },

    #[error("measurement type `{measurement_type}` lists unit `{unit}`: {source}")]
    InvalidUnit {
        measurement_type: String,
        unit: String,
        #[source]
        source: UnitError,
    },
}
