//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use alertbot_matchers::Matchers;
use alertbot_silence::Silence;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone, Default)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => value.write_table(writer)?,
        }
        Ok(())
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Writes one row per matcher.
pub(crate) fn write_matcher_rows<W: Write>(
    writer: &mut W,
    matchers: &Matchers,
) -> Result<(), CliError> {
    writeln!(writer, "{:<24}  {:<4}  VALUE", "NAME", "OP")?;
    writeln!(writer, "{}", "─".repeat(60))?;
    for m in matchers {
        writeln!(
            writer,
            "{:<24}  {:<4}  {}",
            m.name(),
            m.match_type().as_symbol(),
            m.value()
        )?;
    }
    Ok(())
}

impl TableDisplay for Silence {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Silence")?;
        writeln!(writer, "══════════════════════════════════")?;
        if !self.id.is_empty() {
            writeln!(writer, "ID:          {}", self.id)?;
        }
        writeln!(writer, "Matchers:    {}", self.matchers)?;
        writeln!(writer, "State:       {}", self.status.state)?;
        writeln!(writer, "Starts At:   {}", self.starts_at.to_rfc3339())?;
        writeln!(writer, "Ends At:     {}", self.ends_at.to_rfc3339())?;
        writeln!(writer, "Created By:  {}", self.created_by)?;
        if !self.comment.is_empty() {
            writeln!(writer, "Comment:     {}", self.comment)?;
        }
        Ok(())
    }
}
