//! The measurement-type catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use pkdb_units::{Unit, UnitError, UnitRegistry};
use tracing::debug;

use crate::enums::RecordField;
use crate::error::ModelError;
use crate::measurement_type::{MeasurementType, MeasurementTypeDefinition};
use crate::violation::Violation;

/// Immutable set of measurement types sharing one unit registry.
///
/// Built once; lookups take `&self` and the catalog is `Send + Sync`, so a
/// single instance can be shared across threads behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct MeasurementTypeCatalog {
    registry: Arc<UnitRegistry>,
    types: BTreeMap<String, MeasurementType>,
    aliases: BTreeMap<String, String>,
}

impl MeasurementTypeCatalog {
    /// Resolve every definition against `registry`.
    ///
    /// Names must be unique. Synonyms and slugs must not point at two
    /// different types, nor equal the name of another type.
    pub fn from_definitions<I>(
        registry: Arc<UnitRegistry>,
        definitions: I,
    ) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = MeasurementTypeDefinition>,
    {
        let mut types = BTreeMap::new();
        let mut aliases: BTreeMap<String, String> = BTreeMap::new();
        for definition in definitions {
            let entry = MeasurementType::from_definition(definition, &registry)?;
            let name = entry.name().to_string();
            if types.contains_key(&name) {
                return Err(ModelError::DuplicateMeasurementType { name });
            }
            // An earlier synonym or slug must not shadow this name.
            if let Some(existing) = aliases.get(&name) {
                return Err(ModelError::DuplicateSynonym {
                    synonym: name.clone(),
                    name,
                    existing: existing.clone(),
                });
            }
            let keys = std::iter::once(entry.url_slug())
                .chain(entry.synonyms().iter().map(String::as_str));
            for key in keys {
                if key == name {
                    continue;
                }
                if types.contains_key(key) {
                    return Err(ModelError::DuplicateSynonym {
                        synonym: key.to_string(),
                        name,
                        existing: key.to_string(),
                    });
                }
                match aliases.get(key) {
                    Some(existing) if existing != &name => {
                        return Err(ModelError::DuplicateSynonym {
                            synonym: key.to_string(),
                            name,
                            existing: existing.clone(),
                        });
                    }
                    _ => {
                        aliases.insert(key.to_string(), name.clone());
                    }
                }
            }
            types.insert(name, entry);
        }
        debug!(
            measurement_types = types.len(),
            aliases = aliases.len(),
            "built measurement type catalog"
        );
        Ok(Self {
            registry,
            types,
            aliases,
        })
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Shared handle to the registry, for callers that outlive the catalog
    /// borrow.
    pub fn shared_registry(&self) -> Arc<UnitRegistry> {
        Arc::clone(&self.registry)
    }

    /// Exact lookup by name.
    pub fn get(&self, name: &str) -> Result<&MeasurementType, Violation> {
        self.types
            .get(name)
            .ok_or_else(|| Violation::UnknownMeasurementType {
                name: name.to_string(),
            })
    }

    /// Lookup by name, then by url slug or synonym.
    pub fn lookup(&self, key: &str) -> Result<&MeasurementType, Violation> {
        let key = key.trim();
        if let Some(entry) = self.types.get(key) {
            return Ok(entry);
        }
        self.aliases
            .get(key)
            .and_then(|name| self.types.get(name))
            .ok_or_else(|| Violation::UnknownMeasurementType {
                name: key.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Measurement types ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &MeasurementType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `unit` is acceptable for `entry`.
    ///
    /// Without allowed units only an absent unit is valid. With allowed units
    /// a given unit must match one of their dimensions, and an absent unit is
    /// valid only if `NO_UNIT` is listed. Resolution failures are returned as
    /// errors rather than `false`.
    pub fn is_valid_unit(
        &self,
        entry: &MeasurementType,
        unit: Option<&str>,
    ) -> Result<bool, UnitError> {
        let resolved = unit.map(|unit| self.registry.resolve(unit)).transpose()?;
        Ok(match (entry.allowed_units().is_empty(), resolved) {
            (true, None) => true,
            (true, Some(_)) => false,
            (false, Some(unit)) => entry.supports_dimension(unit.dimension()),
            (false, None) => entry.allows_no_unit(),
        })
    }

    /// The canonical unit for the dimension of `unit`.
    pub fn canonical_unit_for<'a>(
        &self,
        entry: &'a MeasurementType,
        unit: &str,
    ) -> Result<&'a Unit, Violation> {
        let resolved = self
            .registry
            .resolve(unit)
            .map_err(|error| Violation::from_unit_error(RecordField::Unit, error))?;
        entry
            .canonical_unit(resolved.dimension())
            .ok_or_else(|| Violation::DimensionNotSupported {
                measurement_type: entry.name().to_string(),
                unit: resolved.name().to_string(),
                dimension: resolved.dimension().clone(),
                allowed_dimensions: entry.allowed_dimensions().into_iter().cloned().collect(),
            })
    }

    /// Whether `unit` already is a canonical unit of `entry`.
    ///
    /// Equivalent spellings count: `g` is canonical if `gram` is.
    pub fn is_canonical_unit(
        &self,
        entry: &MeasurementType,
        unit: &str,
    ) -> Result<bool, UnitError> {
        let resolved = self.registry.resolve(unit)?;
        Ok(entry
            .canonical_unit(resolved.dimension())
            .and_then(|canonical| resolved.conversion_factor_to(canonical))
            .is_some_and(|factor| (factor - 1.0).abs() <= 1e-12))
    }
}
