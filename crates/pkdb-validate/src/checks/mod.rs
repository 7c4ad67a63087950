//! Individual record checks.
//!
//! Each check returns every violation it finds; an empty vector means the
//! record passes that check.

pub mod choice;
pub mod numeric;
pub mod time;
pub mod unit;
