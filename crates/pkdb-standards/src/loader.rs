//! Loading the measurement-type catalog from its table.

use std::path::Path;
use std::sync::Arc;

use pkdb_model::MeasurementTypeCatalog;
use pkdb_units::UnitRegistry;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::paths::catalog_override;
use crate::table::{MeasurementTypeTable, TABLE_SCHEMA, TABLE_SCHEMA_VERSION};

/// The measurement-type table shipped with the crate.
pub const EMBEDDED_TABLE: &str = include_str!("../../../standards/measurement_types.toml");

const EMBEDDED_ORIGIN: &str = "<embedded>/measurement_types.toml";

/// Parse and check a table. `origin` is only used in error messages.
pub fn parse_table(contents: &str, origin: &Path) -> Result<MeasurementTypeTable, CatalogError> {
    let table: MeasurementTypeTable =
        toml::from_str(contents).map_err(|source| CatalogError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
    validate_table(&table)?;
    Ok(table)
}

/// Resolve a parsed table against `registry`.
pub fn build_catalog(
    table: MeasurementTypeTable,
    registry: Arc<UnitRegistry>,
) -> Result<MeasurementTypeCatalog, CatalogError> {
    Ok(MeasurementTypeCatalog::from_definitions(
        registry,
        table.measurement_types,
    )?)
}

/// Load the table at `path`.
pub fn load_catalog(
    path: &Path,
    registry: Arc<UnitRegistry>,
) -> Result<MeasurementTypeCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let table = parse_table(&contents, path)?;
    let catalog = build_catalog(table, registry)?;
    info!(
        path = %path.display(),
        measurement_types = catalog.len(),
        "loaded measurement-type table"
    );
    Ok(catalog)
}

/// Load the embedded table.
pub fn embedded_catalog(
    registry: Arc<UnitRegistry>,
) -> Result<MeasurementTypeCatalog, CatalogError> {
    let table = parse_table(EMBEDDED_TABLE, Path::new(EMBEDDED_ORIGIN))?;
    let catalog = build_catalog(table, registry)?;
    debug!(
        measurement_types = catalog.len(),
        "loaded embedded measurement-type table"
    );
    Ok(catalog)
}

/// Build the standard unit registry and load the catalog from `explicit`,
/// `PKDB_CATALOG`, or the embedded table, in that order.
pub fn load_default_catalog(
    explicit: Option<&Path>,
) -> Result<MeasurementTypeCatalog, CatalogError> {
    let registry = Arc::new(UnitRegistry::standard()?);
    match catalog_override(explicit.map(Path::to_path_buf)) {
        Some(path) => load_catalog(&path, registry),
        None => embedded_catalog(registry),
    }
}

fn validate_table(table: &MeasurementTypeTable) -> Result<(), CatalogError> {
    if table.catalog.schema != TABLE_SCHEMA {
        return Err(CatalogError::invalid(format!(
            "unsupported schema: {}",
            table.catalog.schema
        )));
    }
    if table.catalog.schema_version != TABLE_SCHEMA_VERSION {
        return Err(CatalogError::invalid(format!(
            "unsupported schema_version: {}",
            table.catalog.schema_version
        )));
    }
    if table.measurement_types.is_empty() {
        return Err(CatalogError::invalid("no measurement types defined"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "[catalog]\nschema = \"pkdb.measurement-types\"\nschema_version = 1\n";

    #[test]
    fn embedded_table_parses() {
        let table = parse_table(EMBEDDED_TABLE, Path::new(EMBEDDED_ORIGIN)).unwrap();
        assert!(!table.measurement_types.is_empty());
    }

    #[test]
    fn rejects_unknown_schema() {
        let contents = "[catalog]\nschema = \"other\"\nschema_version = 1\n";
        let error = parse_table(contents, Path::new("t.toml")).unwrap_err();
        insta::assert_snapshot!(error, @"invalid measurement-type table: unsupported schema: other");
    }

    #[test]
    fn rejects_empty_table() {
        let error = parse_table(HEADER, Path::new("t.toml")).unwrap_err();
        assert!(matches!(error, CatalogError::InvalidTable { .. }));
    }

    #[test]
    fn rejects_unknown_fields() {
        let contents = format!(
            "{HEADER}\n[[measurement_type]]\nname = \"age\"\ndtype = \"numeric\"\nunit = \"yr\"\n"
        );
        let error = parse_table(&contents, Path::new("t.toml")).unwrap_err();
        assert!(matches!(error, CatalogError::Toml { .. }));
    }

    #[test]
    fn rejects_unresolvable_units() {
        let contents = format!(
            "{HEADER}\n[[measurement_type]]\nname = \"age\"\ndtype = \"numeric\"\nunits = [\"%\"]\n"
        );
        let table = parse_table(&contents, Path::new("t.toml")).unwrap();
        let registry = Arc::new(UnitRegistry::standard().unwrap());
        let error = build_catalog(table, registry).unwrap_err();
        assert!(matches!(error, CatalogError::Model(_)));
        assert!(error.to_string().contains("'percent'"));
    }
}
