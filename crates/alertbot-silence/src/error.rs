//! Error types for the alertbot-silence crate.

use alertbot_matchers::MatcherError;
use thiserror::Error;

/// Errors that can occur while building or submitting silences.
#[derive(Debug, Error)]
pub enum SilenceError {
    /// Matcher text was malformed or held an invalid regex.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The silence window is empty or inverted.
    #[error("invalid silence window: {reason}")]
    InvalidWindow {
        /// Why the window was rejected.
        reason: String,
    },

    /// No current alert has the requested fingerprint.
    #[error("no alert matches fingerprint {fingerprint}")]
    NotFound {
        /// The fingerprint that was looked up.
        fingerprint: String,
    },

    /// The alert source returned no alerts at all.
    #[error("no alerts found right now")]
    NoAlerts,

    /// An alert source or silence sink failed.
    #[error("upstream error: {reason}")]
    Upstream {
        /// The collaborator's description of the failure.
        reason: String,
    },

    /// A silence with the given ID does not exist.
    #[error("silence not found: {id}")]
    SilenceNotFound {
        /// The silence ID that was not found.
        id: String,
    },

    /// The silencing configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl SilenceError {
    /// Creates an upstream error from a collaborator failure.
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::Upstream {
            reason: reason.into(),
        }
    }
}

/// Result type for silence operations.
pub type Result<T> = std::result::Result<T, SilenceError>;
