//! Error types for the alertbot-matchers crate.

use thiserror::Error;

/// Errors that can occur while parsing or compiling matchers.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The matcher text is malformed.
    #[error("{reason}: {input}")]
    Syntax {
        /// What is wrong with the input.
        reason: String,
        /// The offending input.
        input: String,
    },

    /// The value of a regex matcher is not a valid pattern.
    #[error("invalid matcher pattern {pattern:?}: {source}")]
    Pattern {
        /// The pattern as written by the user, before anchoring.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: regex::Error,
    },
}

impl MatcherError {
    pub(crate) fn syntax(reason: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Syntax {
            reason: reason.into(),
            input: input.into(),
        }
    }

    /// Returns true if this is a syntax error.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns true if this is a pattern compilation error.
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern { .. })
    }
}

/// Result type for matcher operations.
pub type Result<T> = std::result::Result<T, MatcherError>;
