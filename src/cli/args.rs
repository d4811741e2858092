//! CLI argument definitions.

use crate::config::OutputMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert whistle detection CSV files to Raven selection tables.
#[derive(Debug, Parser)]
#[command(name = "whistle-raven")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Folder containing detection CSV files to convert.
    #[arg(required = true)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for selection tables (default: the input folder).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Continue with the next CSV file when one fails.
    #[arg(long)]
    pub keep_going: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Console output mode (human, json).
    #[arg(long, default_value_t = OutputMode::Human, global = true)]
    pub output_mode: OutputMode,

    /// Only show warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}
