//! Library side of the `pkdb` command-line tool.

pub mod commands;
pub mod logging;
pub mod submission;
pub mod summary;
