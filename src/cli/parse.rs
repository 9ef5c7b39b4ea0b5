//! CLI parse: clap types for fixture-builder. No behavior; definitions only.

use crate::cli::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fixture Builder CLI - structured test data with generated values
#[derive(Parser)]
#[command(name = "fixture-builder")]
#[command(about = "Look up fixture records and resolve their generation directives")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for repeatable generated values
    #[arg(long)]
    pub seed: Option<u64>,

    /// Caller identity for sequential cursors
    #[arg(long)]
    pub caller: Option<String>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a record (`record` or `file/record`) and print it
    Resolve {
        /// Record key
        key: String,
        /// Override a field, e.g. `--set name=Ann` or `--set owner.first=~first_name`
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Evaluate a single directive expression
    Eval {
        /// Expression, with or without the leading `~`
        expression: String,
    },
    /// List the generator vocabulary
    Capabilities,
}
