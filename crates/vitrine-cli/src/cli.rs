//! CLI argument definitions for the Vitrine integrity checker.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format selection for the batch report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented per-file report for terminals.
    #[default]
    Human,
    /// The full batch report as JSON.
    Json,
}

/// Command-line interface for the Vitrine plugin integrity checker.
///
/// With no arguments the checker walks the current working directory, the
/// same contract CI relies on: exit 0 when every candidate passes, exit 1
/// when any candidate fails or cannot be loaded.
#[derive(Parser, Debug)]
#[command(name = "vitrine", about = "Checks plugin scripts against the host lifecycle contract")]
pub(crate) struct Cli {
    /// Directory of candidate plugin scripts (defaults to the current
    /// working directory).
    #[arg(value_name = "DIR")]
    pub(crate) directory: Option<PathBuf>,

    /// Controls how the batch report is rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub(crate) output: OutputFormat,
}
