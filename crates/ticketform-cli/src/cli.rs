//! CLI argument definitions for the `ticketform` driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ticketform_cli::replay::Assignment;
use ticketform_model::Variant;

#[derive(Parser)]
#[command(
    name = "ticketform",
    version,
    about = "Evaluate the ticket submission form rules against a saved form",
    long_about = "Evaluate the ticket submission form rules against a saved form.\n\n\
                  Loads a JSON form snapshot, replays field changes through the\n\
                  visibility controller and validator, and reports the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Deployment whose fields and rules apply (dc, dc-staging, ann-arbor).
    #[arg(long, value_name = "VARIANT", global = true)]
    pub variant: Option<Variant>,

    /// JSON configuration file layered over the built-in variant.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
}

#[derive(Subcommand)]
pub enum Command {
    /// List the fields of the configured form and their selectors.
    Fields,

    /// List the registered rule bindings.
    Rules,

    /// Load a form snapshot, replay changes and report groups and messages.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// JSON form snapshot.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Change a field, in order given (repeatable).
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<Assignment>,

    /// Run the whole-form check after replaying changes.
    ///
    /// Exits with status 1 when a blocking rule fails.
    #[arg(long)]
    pub submit: bool,

    /// Write the resulting form snapshot to this path.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the result as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
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
