//! CLI argument definitions for the pkdb measurement-type tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pkdb",
    version,
    about = "Validate and normalize pharmacokinetic measurements",
    long_about = "Validate measurement records against the measurement-type catalog\n\
                  and convert their values into canonical units.\n\n\
                  The catalog is read from --catalog, the PKDB_CATALOG environment\n\
                  variable, or the built-in table, in that order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Measurement-type table to load instead of the built-in one.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include submitted record values in log events.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the measurement types of the catalog.
    Types,

    /// Describe one measurement type as JSON.
    Show(ShowArgs),

    /// Validate a JSON file of measurement submissions.
    Validate(ValidateArgs),

    /// Convert a magnitude into the canonical unit of a measurement type.
    Normalize(NormalizeArgs),

    /// Convert a magnitude between two units.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Measurement type name, synonym or slug.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON array of submissions, each with a `measurement_type` field.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report every violation instead of stopping at the first failing check.
    #[arg(long = "aggregate")]
    pub aggregate: bool,

    /// Attach the record converted to canonical units to accepted submissions.
    #[arg(long = "normalize")]
    pub normalize: bool,

    /// Print the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Measurement type name, synonym or slug.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(value_name = "MAGNITUDE", allow_negative_numbers = true)]
    pub magnitude: f64,

    #[arg(value_name = "UNIT")]
    pub unit: String,
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[arg(value_name = "MAGNITUDE", allow_negative_numbers = true)]
    pub magnitude: f64,

    #[arg(value_name = "FROM")]
    pub from: String,

    #[arg(value_name = "TO")]
    pub to: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
