//! Unit registry for measurement validation.
//!
//! Resolves unit expressions (`mg*h/l`, `ml/min/kg`, `1/h`) to a
//! [`Dimension`] and a scale, and converts magnitudes between units of equal
//! dimension. On top of the standard dimensional units the registry carries
//! the custom vocabulary in [`CUSTOM_DEFINITIONS`] (`cups`, `percent`, `U`,
//! `IU`, `NO_UNIT`, ...).
//!
//! ```
//! use pkdb_units::UnitRegistry;
//!
//! let registry = UnitRegistry::standard().unwrap();
//! let grams = registry.convert(2.5, "kg", "g").unwrap();
//! assert!((grams - 2500.0).abs() < 1e-9);
//! ```

#![deny(unsafe_code)]

pub mod definitions;
pub mod dimension;
pub mod error;
mod expr;
pub mod registry;
pub mod unit;

pub use crate::definitions::{CUSTOM_DEFINITIONS, NO_UNIT};
pub use crate::dimension::Dimension;
pub use crate::error::{DefinitionError, UnitError};
pub use crate::registry::{UnitRegistry, UnitRegistryBuilder, convert_units};
pub use crate::unit::Unit;
