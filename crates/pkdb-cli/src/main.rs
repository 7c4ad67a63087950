//! pkdb measurement-type CLI.

use clap::{ColorChoice, Parser};
use pkdb_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;

use pkdb_cli::commands::{
    convert_value, describe_json, load_catalog, normalize_value, report_json, types_table,
    validate_file,
};
use pkdb_cli::submission::CheckSettings;
use pkdb_cli::summary::print_report;
use pkdb_validate::{ValidationMode, ValidationOptions};

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ValidateArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let catalog = load_catalog(cli.catalog.as_deref())?;
    match &cli.command {
        Command::Types => println!("{}", types_table(&catalog)),
        Command::Show(args) => println!("{}", describe_json(&catalog, &args.name)?),
        Command::Validate(args) => {
            let report = validate_file(&catalog, &args.file, check_settings(args))?;
            if args.json {
                println!("{}", report_json(&report)?);
            } else {
                print_report(&report);
            }
            return Ok(if report.has_rejections() { 1 } else { 0 });
        }
        Command::Normalize(args) => println!(
            "{}",
            normalize_value(&catalog, &args.name, args.magnitude, &args.unit)?
        ),
        Command::Convert(args) => println!(
            "{}",
            convert_value(&catalog, args.magnitude, &args.from, &args.to)?
        ),
    }
    Ok(0)
}

fn check_settings(args: &ValidateArgs) -> CheckSettings {
    let mode = if args.aggregate {
        ValidationMode::Aggregate
    } else {
        ValidationMode::FailFast
    };
    CheckSettings {
        options: ValidationOptions::new().with_mode(mode),
        normalize: args.normalize,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
