//! Conversion of accepted measurements to canonical units.
//!
//! Every measurement type designates one canonical unit per dimension it
//! supports. [`Normalizer::normalize`] converts a magnitude into the
//! canonical unit of its own dimension and never into another dimension.

#![deny(unsafe_code)]

mod normalizer;

pub use normalizer::Normalizer;
