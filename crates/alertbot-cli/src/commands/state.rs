//! State command implementation.

use std::io::Write;

use alertbot_silence::{compute_state, is_resolved_at, SilenceState};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::StateArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Handler for the state command.
#[derive(Debug, Default)]
pub struct StateCommand;

impl StateCommand {
    /// Creates a new state command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes and writes the state of a silence window.
    ///
    /// # Errors
    ///
    /// Returns error if a timestamp is not valid RFC 3339.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &StateArgs,
    ) -> Result<(), CliError> {
        let starts_at = parse_timestamp("starts-at", &args.starts_at)?;
        let ends_at = parse_timestamp("ends-at", &args.ends_at)?;
        let now = match &args.now {
            Some(now) => parse_timestamp("now", now)?,
            None => Utc::now(),
        };

        let report = StateReport {
            starts_at,
            ends_at,
            now,
            state: compute_state(starts_at, ends_at, now),
            resolved: is_resolved_at(ends_at, now),
        };
        format.write(out, &report)
    }
}

/// Parses an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` naming the flag on failure.
pub fn parse_timestamp(flag: &str, raw: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CliError::InvalidArgument(format!("--{flag} {raw:?}: {e}")))
}

/// State of a silence window at an instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    /// Start of the window.
    pub starts_at: DateTime<Utc>,
    /// End of the window.
    pub ends_at: DateTime<Utc>,
    /// Instant the state was computed at.
    pub now: DateTime<Utc>,
    /// The computed state.
    pub state: SilenceState,
    /// Whether the window has ended.
    pub resolved: bool,
}

impl TableDisplay for StateReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Starts At:  {}", self.starts_at.to_rfc3339())?;
        writeln!(writer, "Ends At:    {}", self.ends_at.to_rfc3339())?;
        writeln!(writer, "Now:        {}", self.now.to_rfc3339())?;
        writeln!(writer, "State:      {}", self.state)?;
        writeln!(
            writer,
            "Resolved:   {}",
            if self.resolved { "yes" } else { "no" }
        )?;
        Ok(())
    }
}
