//! Construction of blanket and targeted silences.

use alertbot_matchers::{parse_matchers, render_label_set, LabelSet};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SilenceConfig;
use crate::error::{Result, SilenceError};
use crate::types::Silence;

/// Matches every alert whose `alertname` label is non-empty.
pub const MATCH_ALL: &str = r#"alertname=~".+""#;

/// An alert as reported by the alert source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAlert {
    /// Identity of the alert's label set, computed upstream.
    pub fingerprint: String,
    /// The label set in matcher syntax, e.g. `{alertname="HighCPU"}`.
    pub labels: String,
}

impl CandidateAlert {
    /// Creates a candidate from an already rendered label string.
    pub fn new(fingerprint: impl Into<String>, labels: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            labels: labels.into(),
        }
    }

    /// Creates a candidate by rendering a label set.
    pub fn from_labels(fingerprint: impl Into<String>, labels: &LabelSet) -> Self {
        Self::new(fingerprint, render_label_set(labels))
    }
}

/// Finds the candidate with the given fingerprint.
///
/// # Errors
///
/// Returns `SilenceError::NoAlerts` for an empty list and
/// `SilenceError::NotFound` when no candidate has the fingerprint.
pub fn find_candidate<'a>(
    fingerprint: &str,
    candidates: &'a [CandidateAlert],
) -> Result<&'a CandidateAlert> {
    if candidates.is_empty() {
        return Err(SilenceError::NoAlerts);
    }

    candidates
        .iter()
        .find(|c| c.fingerprint == fingerprint)
        .ok_or_else(|| SilenceError::NotFound {
            fingerprint: fingerprint.to_string(),
        })
}

/// Returns the end of a window of `duration` starting at `now`.
fn window_end(now: DateTime<Utc>, duration: Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(duration)
        .ok_or_else(|| SilenceError::InvalidWindow {
            reason: format!(
                "silence of {} seconds ends out of range",
                duration.num_seconds()
            ),
        })
}

/// Builds a silence over every alert, from `now` for `duration`.
///
/// # Errors
///
/// Returns `SilenceError::InvalidWindow` if `duration` is not positive or
/// the window would end past the representable range.
pub fn build_blanket_silence(
    duration: Duration,
    now: DateTime<Utc>,
    config: &SilenceConfig,
) -> Result<Silence> {
    let matchers = parse_matchers(MATCH_ALL)?;
    debug!(matchers = %matchers, duration_secs = duration.num_seconds(), "building blanket silence");

    Silence::new_at(
        matchers,
        now,
        window_end(now, duration)?,
        config.created_by.as_str(),
        config.comment.as_str(),
        now,
    )
}

/// Builds a silence over the alert with `fingerprint`, from `now` for
/// `duration`, using that alert's labels as equality matchers.
///
/// # Errors
///
/// Returns `SilenceError::NoAlerts` for an empty candidate list,
/// `SilenceError::NotFound` if no candidate has the fingerprint,
/// `SilenceError::Matcher` if the candidate's labels do not parse, and
/// `SilenceError::InvalidWindow` if `duration` is not positive or the window
/// would end past the representable range.
pub fn build_targeted_silence(
    fingerprint: &str,
    duration: Duration,
    candidates: &[CandidateAlert],
    now: DateTime<Utc>,
    config: &SilenceConfig,
) -> Result<Silence> {
    let candidate = find_candidate(fingerprint, candidates)?;
    let matchers = parse_matchers(&candidate.labels)?;
    debug!(
        fingerprint = %fingerprint,
        matchers = %matchers,
        duration_secs = duration.num_seconds(),
        "building targeted silence"
    );

    Silence::new_at(
        matchers,
        now,
        window_end(now, duration)?,
        config.created_by.as_str(),
        config.comment.as_str(),
        now,
    )
}
