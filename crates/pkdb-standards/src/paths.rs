//! Measurement-type table path resolution.

use std::path::PathBuf;

/// Environment variable pointing at an alternative measurement-type table.
pub const CATALOG_ENV_VAR: &str = "PKDB_CATALOG";

/// Table file to load instead of the embedded one, if any.
///
/// Resolution order:
/// 1. `explicit` (the CLI `--catalog` flag)
/// 2. `PKDB_CATALOG` environment variable
///
/// `None` means the embedded table is used.
pub fn catalog_override(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(CATALOG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
