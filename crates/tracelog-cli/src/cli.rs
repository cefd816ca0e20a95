//! CLI argument definitions for the trace log dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracelog_model::PeriodKey;

#[derive(Parser)]
#[command(
    name = "tracelog",
    version,
    about = "Inspection trace log dashboard - OK/NG summaries from a CSV log",
    long_about = "Summarize an inspection trace log (CSV) in the terminal.\n\n\
                  Reports overall OK/NG counts, the daily trend, model and station\n\
                  breakdowns, and the NG detail table for all periods or one month."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the dashboard for a trace log.
    Report(ReportArgs),

    /// List the months present in a trace log.
    Periods(PeriodsArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Path to the trace log CSV.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Restrict the view to one month (YYYY-MM). Unknown months fall back to all periods.
    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: Option<PeriodKey>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Maximum number of NG rows shown in the failure table.
    #[arg(long = "max-failures", value_name = "N", default_value_t = 50)]
    pub max_failures: usize,

    /// Also write the rows of the active view to a CSV file.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PeriodsArgs {
    /// Path to the trace log CSV.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
