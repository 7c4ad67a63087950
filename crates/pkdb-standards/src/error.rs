use std::path::PathBuf;

use pkdb_model::ModelError;
use pkdb_units::DefinitionError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse measurement-type table {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid measurement-type table: {message}")]
    InvalidTable { message: String },

    #[error("invalid measurement type: {0}")]
    Model(#[from] ModelError),

    #[error("failed to build unit registry: {0}")]
    Registry(#[from] DefinitionError),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidTable {
            message: message.into(),
        }
    }
}
