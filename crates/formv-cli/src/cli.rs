//! CLI argument definitions for the form validator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formv",
    version,
    about = "Validate form documents against a JSON rule configuration",
    long_about = "Validate the fields of form documents against a JSON rule \
                  configuration.\n\n\
                  Each document is checked independently and its report is \
                  printed as JSON on stdout. Validation findings are normal \
                  output; only unreadable files or a malformed configuration \
                  abort the run."
)]
pub struct Cli {
    /// Path to the JSON validation configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// One or more document files to validate.
    #[arg(value_name = "DOCUMENT", required = true, num_args = 1..)]
    pub documents: Vec<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
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
