//! Match command implementation.
//!
//! Evaluates a matcher list against labels given on the command line.

use std::io::Write;

use alertbot_matchers::{parse_matchers, render_label_set, LabelSet};
use serde::Serialize;

use crate::cli::MatchArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Handler for the match command.
#[derive(Debug, Default)]
pub struct MatchCommand;

impl MatchCommand {
    /// Creates a new match command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates the matchers and writes the outcome.
    ///
    /// Returns whether every matcher matched.
    ///
    /// # Errors
    ///
    /// Returns error if the expression or a label does not parse.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &MatchArgs,
    ) -> Result<bool, CliError> {
        let matchers = parse_matchers(&args.expr)?;
        let labels = parse_labels(&args.labels)?;

        let failed: Vec<String> = matchers
            .iter()
            .filter(|m| !m.matches(&labels))
            .map(ToString::to_string)
            .collect();

        let outcome = MatchOutcome {
            matched: failed.is_empty(),
            matchers: matchers.to_string(),
            labels: render_label_set(&labels),
            failed,
        };
        format.write(out, &outcome)?;
        Ok(outcome.matched)
    }
}

/// Parses `NAME=VALUE` pairs into a label set.
///
/// The value may itself contain `=`; a later pair overrides an earlier one.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for a pair without `=` or with an
/// empty name.
pub fn parse_labels(pairs: &[String]) -> Result<LabelSet, CliError> {
    let mut labels = LabelSet::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| {
                CliError::InvalidArgument(format!("label must be NAME=VALUE, got {pair:?}"))
            })?;
        labels.insert(name.trim().to_string(), value.to_string());
    }
    Ok(labels)
}

/// Outcome of evaluating a matcher list.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// True if every matcher matched.
    pub matched: bool,
    /// The evaluated matchers.
    pub matchers: String,
    /// The labels they were evaluated against.
    pub labels: String,
    /// Matchers that did not match.
    pub failed: Vec<String>,
}

impl TableDisplay for MatchOutcome {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Matchers:  {}", self.matchers)?;
        writeln!(writer, "Labels:    {}", self.labels)?;
        writeln!(
            writer,
            "Result:    {}",
            if self.matched { "match" } else { "no match" }
        )?;
        for failed in &self.failed {
            writeln!(writer, "  failed:  {failed}")?;
        }
        Ok(())
    }
}
