#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;
pub mod table;

pub use crate::error::CatalogError;
pub use crate::loader::{
    EMBEDDED_TABLE, build_catalog, embedded_catalog, load_catalog, load_default_catalog,
    parse_table,
};
pub use crate::paths::{CATALOG_ENV_VAR, catalog_override};
pub use crate::table::{MeasurementTypeTable, TableHeader};
