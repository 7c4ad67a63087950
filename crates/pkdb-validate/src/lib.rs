//! Measurement record validation.
//!
//! [`Validator::validate_complete`] is the entry point a collaborator calls
//! before accepting a record. Checks run in a fixed order: unit, numeric sign,
//! choice, time unit, time requirement.

#![deny(unsafe_code)]

pub mod checks;
mod options;
mod validator;

pub use options::{ValidationMode, ValidationOptions};
pub use validator::Validator;
