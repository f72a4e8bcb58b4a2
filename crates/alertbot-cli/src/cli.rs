//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// alertbot - matchers and silences for Alertmanager.
#[derive(Parser, Debug, Clone)]
#[command(name = "alertbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// JSON file with silence settings.
    #[arg(short, long, env = "ALERTBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Author recorded on built silences.
    #[arg(long, env = "ALERTBOT_CREATED_BY")]
    pub created_by: Option<String>,

    /// Comment recorded on built silences.
    #[arg(long, env = "ALERTBOT_COMMENT")]
    pub comment: Option<String>,

    /// Maintenance length when no valid number of hours is given.
    #[arg(long, env = "ALERTBOT_MAINTENANCE_DEFAULT_HOURS")]
    pub maintenance_default_hours: Option<i64>,

    /// Longest maintenance window that may be requested, in hours.
    #[arg(long, env = "ALERTBOT_MAINTENANCE_MAX_HOURS")]
    pub maintenance_max_hours: Option<i64>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Parse a matcher list and print it normalized.
    Parse {
        /// Matcher list, e.g. `{alertname="HighCPU",env=~"prod.*"}`.
        expr: String,
    },

    /// Evaluate a matcher list against a label set.
    ///
    /// Exits with status 0 when every matcher matches and 1 otherwise.
    Match(MatchArgs),

    /// Show the state of a silence window.
    State(StateArgs),

    /// Build the blanket silence for a maintenance window.
    Maintenance {
        /// Length of the window in hours.
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<i64>,
    },

    /// Build a silence for one current alert.
    Target(TargetArgs),
}

/// Arguments for the match command.
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Matcher list to evaluate.
    pub expr: String,

    /// Alert labels (NAME=VALUE).
    #[arg(short, long = "label", value_name = "NAME=VALUE")]
    pub labels: Vec<String>,
}

/// Arguments for the state command.
#[derive(Args, Debug, Clone)]
pub struct StateArgs {
    /// Start of the window (RFC 3339).
    #[arg(long)]
    pub starts_at: String,

    /// End of the window (RFC 3339).
    #[arg(long)]
    pub ends_at: String,

    /// Instant to evaluate at (RFC 3339), defaults to now.
    #[arg(long)]
    pub now: Option<String>,
}

/// Arguments for the target command.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Fingerprint of the alert to silence.
    pub fingerprint: String,

    /// JSON file listing current alerts.
    #[arg(short, long)]
    pub alerts: PathBuf,

    /// Silence length: 2h, 48h or 2w.
    #[arg(short, long, default_value = "2h")]
    pub preset: String,
}
