//! CLI error types.

use alertbot_matchers::MatcherError;
use alertbot_silence::SilenceError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// A matcher failed to parse or compile.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A silence could not be built or submitted.
    #[error(transparent)]
    Silence(#[from] SilenceError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
