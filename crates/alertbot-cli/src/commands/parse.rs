//! Parse command implementation.

use std::io::Write;

use alertbot_matchers::{parse_matchers, Matchers};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{write_matcher_rows, OutputFormat, TableDisplay};

/// Handler for the parse command.
#[derive(Debug, Default)]
pub struct ParseCommand;

impl ParseCommand {
    /// Creates a new parse command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses `expr` and writes the normalized matchers.
    ///
    /// # Errors
    ///
    /// Returns error if the expression does not parse.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        expr: &str,
    ) -> Result<(), CliError> {
        let matchers = parse_matchers(expr)?;
        let parsed = ParsedMatchers {
            rendered: matchers.to_string(),
            matchers,
        };
        format.write(out, &parsed)
    }
}

/// A parsed matcher list with its canonical rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedMatchers {
    /// The list rendered back to matcher syntax.
    pub rendered: String,
    /// Parsed matchers in input order.
    pub matchers: Matchers,
}

impl TableDisplay for ParsedMatchers {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.matchers.is_empty() {
            writeln!(writer, "No matchers")?;
            return Ok(());
        }
        write_matcher_rows(writer, &self.matchers)?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    fn run(format: Format, expr: &str) -> Result<String, CliError> {
        let mut buf = Vec::new();
        ParseCommand::new().execute(&mut buf, &OutputFormat::new(format), expr)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn table_shows_rendering() {
        let out = run(Format::Table, r#"{ env = prod , job=~"api.*" }"#).unwrap();
        assert!(out.contains(r#"{env="prod",job=~"api.*"}"#));
    }

    #[test]
    fn json_uses_v1_shape() {
        let out = run(Format::Json, r#"job!~"api.*""#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rendered"], r#"{job!~"api.*"}"#);
        assert_eq!(value["matchers"][0]["name"], "job");
        assert_eq!(value["matchers"][0]["isRegex"], true);
        assert_eq!(value["matchers"][0]["isEqual"], false);
    }

    #[test]
    fn empty_list() {
        let out = run(Format::Table, "{}").unwrap();
        assert_eq!(out.trim(), "No matchers");
    }

    #[test]
    fn bad_input_fails() {
        let err = run(Format::Table, "not a matcher").unwrap_err();
        assert!(matches!(err, CliError::Matcher(e) if e.is_syntax()));
    }
}
