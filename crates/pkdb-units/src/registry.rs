//! The unit registry.
//!
//! A [`UnitRegistryBuilder`] is the only mutable stage: definitions are
//! loaded once, then [`UnitRegistryBuilder::build`] freezes them into an
//! immutable [`UnitRegistry`] that is `Send + Sync` and shared by reference.

use std::collections::HashMap;

use tracing::debug;

use crate::definitions::{BASE_DEFINITIONS, CUSTOM_DEFINITIONS, PREFIXES};
use crate::dimension::Dimension;
use crate::error::{DefinitionError, UnitError};
use crate::expr::{ExprError, Quantity, evaluate};
use crate::unit::Unit;

/// Builder that accepts unit definitions before the registry is frozen.
#[derive(Debug, Clone)]
pub struct UnitRegistryBuilder {
    units: HashMap<String, Quantity>,
    prefixes: Vec<(String, f64)>,
}

impl Default for UnitRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistryBuilder {
    /// Create a builder with SI prefixes and no units.
    pub fn new() -> Self {
        let mut prefixes: Vec<(String, f64)> = PREFIXES
            .iter()
            .flat_map(|(name, symbols, factor)| {
                std::iter::once(*name)
                    .chain(symbols.iter().copied())
                    .map(move |prefix| (prefix.to_string(), *factor))
            })
            .collect();
        // Longest prefix first so `da` wins over `d`.
        prefixes.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self {
            units: HashMap::new(),
            prefixes,
        }
    }

    /// Add one definition of the form `name = expression [= alias ...]`.
    pub fn define(&mut self, definition: &str) -> Result<&mut Self, DefinitionError> {
        let parts: Vec<&str> = definition.split('=').map(str::trim).collect();
        if parts.len() < 2 {
            return Err(DefinitionError::invalid(definition, "expected `name = expression`"));
        }
        let expression = parts[1];
        let quantity = if let Some(inner) = expression
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let inner = inner.trim();
            if inner.is_empty() {
                Quantity::number(1.0)
            } else if is_identifier(inner) {
                Quantity {
                    scale: 1.0,
                    dimension: Dimension::base(inner),
                }
            } else {
                return Err(DefinitionError::invalid(
                    definition,
                    format!("invalid base dimension [{inner}]"),
                ));
            }
        } else {
            evaluate(expression, &|name| self.lookup(name)).map_err(|error| match error {
                ExprError::UnknownName(name) => {
                    DefinitionError::invalid(definition, format!("unknown unit `{name}`"))
                }
                ExprError::Syntax(message) => DefinitionError::invalid(definition, message),
            })?
        };

        let names = std::iter::once(parts[0]).chain(parts[2..].iter().copied());
        for name in names {
            if !is_identifier(name) {
                return Err(DefinitionError::invalid(
                    definition,
                    format!("invalid unit name `{name}`"),
                ));
            }
            if self.units.contains_key(name) {
                return Err(DefinitionError::Redefinition {
                    name: name.to_string(),
                });
            }
            self.units.insert(name.to_string(), quantity.clone());
        }
        Ok(self)
    }

    /// Add every definition in order.
    pub fn define_all(&mut self, definitions: &[&str]) -> Result<&mut Self, DefinitionError> {
        for definition in definitions {
            self.define(definition)?;
        }
        Ok(self)
    }

    /// Freeze the definitions.
    pub fn build(self) -> UnitRegistry {
        debug!(units = self.units.len(), "built unit registry");
        UnitRegistry {
            units: self.units,
            prefixes: self.prefixes,
        }
    }

    fn lookup(&self, name: &str) -> Option<Quantity> {
        lookup(&self.units, &self.prefixes, name)
    }
}

/// Immutable unit registry.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, Quantity>,
    prefixes: Vec<(String, f64)>,
}

impl UnitRegistry {
    pub fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder::new()
    }

    /// Registry with the standard dimensional units and the custom vocabulary.
    pub fn standard() -> Result<Self, DefinitionError> {
        let mut builder = UnitRegistryBuilder::new();
        builder
            .define_all(BASE_DEFINITIONS)?
            .define_all(CUSTOM_DEFINITIONS)?;
        Ok(builder.build())
    }

    /// Resolve a unit expression such as `mg*h/l`.
    ///
    /// `%` is rejected with [`UnitError::PercentNotAllowed`]; everything that
    /// does not evaluate to a finite, non-zero scale is [`UnitError::Undefined`].
    pub fn resolve(&self, unit: &str) -> Result<Unit, UnitError> {
        let name = unit.trim();
        if name == "%" {
            return Err(UnitError::PercentNotAllowed);
        }
        let quantity = evaluate(name, &|token| self.lookup(token))
            .map_err(|_| UnitError::undefined(name))?;
        if !quantity.scale.is_finite() || quantity.scale == 0.0 {
            return Err(UnitError::undefined(name));
        }
        Ok(Unit::new(name, quantity.dimension, quantity.scale))
    }

    pub fn dimension_of(&self, unit: &str) -> Result<Dimension, UnitError> {
        self.resolve(unit).map(|unit| unit.dimension().clone())
    }

    /// Convert a magnitude between two unit expressions of equal dimension.
    pub fn convert(&self, magnitude: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        convert_units(magnitude, &from, &to)
    }

    /// The `[time]` dimension, used for time-unit checks.
    pub fn time_dimension(&self) -> Dimension {
        Dimension::time()
    }

    /// True if `name` is a single defined unit name (prefixes and plurals
    /// included), as opposed to a compound expression.
    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of defined names, aliases included.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<Quantity> {
        lookup(&self.units, &self.prefixes, name)
    }
}

/// Convert between two already resolved units.
pub fn convert_units(magnitude: f64, from: &Unit, to: &Unit) -> Result<f64, UnitError> {
    from.conversion_factor_to(to)
        .map(|factor| magnitude * factor)
        .ok_or_else(|| UnitError::IncompatibleDimensions {
            from: from.name().to_string(),
            from_dimension: from.dimension().clone(),
            to: to.name().to_string(),
            to_dimension: to.dimension().clone(),
        })
}

fn lookup(
    units: &HashMap<String, Quantity>,
    prefixes: &[(String, f64)],
    name: &str,
) -> Option<Quantity> {
    lookup_prefixed(units, prefixes, name).or_else(|| {
        let singular = name.strip_suffix('s').filter(|stem| !stem.is_empty())?;
        lookup_prefixed(units, prefixes, singular)
    })
}

fn lookup_prefixed(
    units: &HashMap<String, Quantity>,
    prefixes: &[(String, f64)],
    name: &str,
) -> Option<Quantity> {
    if let Some(quantity) = units.get(name) {
        return Some(quantity.clone());
    }
    prefixes.iter().find_map(|(prefix, factor)| {
        let rest = name.strip_prefix(prefix.as_str())?;
        let base = units.get(rest)?;
        Some(Quantity {
            scale: factor * base.scale,
            dimension: base.dimension.clone(),
        })
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == 'µ' || first == 'μ' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
