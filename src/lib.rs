//! whistle-raven - whistle detection to Raven selection table converter.
//!
//! This crate turns detector CSV output into one Raven selection table per
//! source audio file, ready to open next to the recording in Raven Pro.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command, ConfigAction};
use config::{
    Config, ErrorPolicy, OutputMode, config_file_path, load_config, save_config,
};
use convert::{ConversionSummary, ConvertOptions, convert_directory};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the whistle-raven CLI.
pub fn run() -> Result<()> {
    let mut cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet, cli.output_mode);

    if let Some(command) = cli.command.take() {
        return handle_command(command, cli.config.as_deref(), cli.output_mode);
    }

    // clap enforces the input directory whenever no subcommand is given
    let Some(input_dir) = cli.input_dir.as_deref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = convert(input_dir, &cli);
    match &result {
        // the summary envelope already lists the failed files
        Err(Error::ConversionFailures { .. }) => {}
        Err(e) if cli.output_mode.is_structured() => output::emit_json_error(e),
        _ => {}
    }
    result
}

/// Convert a directory and report the summary.
///
/// Failed files under the skip policy still produce a full summary before
/// [`Error::ConversionFailures`] is returned.
fn convert(input_dir: &Path, cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let on_error = if cli.keep_going {
        ErrorPolicy::Skip
    } else {
        config.convert.on_error
    };
    let options = ConvertOptions {
        output_dir: cli.output_dir.clone().or(config.convert.output_dir),
        on_error,
        progress: config.convert.progress
            && !cli.no_progress
            && !cli.quiet
            && !cli.output_mode.is_structured(),
    };

    let summary = convert_directory(input_dir, &options)?;

    if cli.output_mode.is_structured() {
        output::emit_json_result(&summary);
    } else {
        report_summary(&summary);
    }

    match summary.failed() {
        0 => Ok(()),
        failed => Err(Error::ConversionFailures { failed }),
    }
}

fn report_summary(summary: &ConversionSummary) {
    if summary.files.is_empty() {
        return;
    }

    info!(
        "Done! {} converted, {} skipped, {} failed: {} table(s) with {} selection(s) in '{}'",
        summary.converted(),
        summary.skipped(),
        summary.failed(),
        summary.tables(),
        summary.selections(),
        summary.output_dir.display()
    );

    if summary.failed() > 0 {
        warn!("{} CSV file(s) had errors", summary.failed());
    }
}

fn init_logging(verbose: u8, quiet: bool, mode: OutputMode) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // JSON mode owns stdout
    if mode.is_structured() {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

fn handle_command(command: Command, config_path: Option<&Path>, mode: OutputMode) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config_path, mode),
    }
}

/// Payload for `config show` in JSON mode.
#[derive(Serialize)]
struct ConfigPayload {
    result_type: output::ResultType,
    config: Config,
}

#[allow(clippy::print_stdout)]
fn handle_config_command(
    action: ConfigAction,
    config_path: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_path.map_or_else(config_file_path, |p| Ok(p.to_path_buf()))?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            if mode.is_structured() {
                output::emit_json_result(&ConfigPayload {
                    result_type: output::ResultType::Config,
                    config,
                });
            } else {
                println!("{config:#?}");
            }
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_path.map_or_else(config_file_path, |p| Ok(p.to_path_buf()))?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
