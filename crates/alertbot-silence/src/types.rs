//! Core types for the silence lifecycle.
//!
//! - [`SilenceState`]: pending, active or expired, derived from the clock
//! - [`Silence`]: a time-bounded suppression built from a matcher list
//! - [`SilencePreset`]: the fixed durations offered to operators

use std::fmt;
use std::str::FromStr;

use alertbot_matchers::{LabelSet, Matchers};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SilenceError};

/// The lifecycle state of a silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SilenceState {
    /// The silence starts in the future.
    Pending,
    /// The silence currently suppresses matching alerts.
    Active,
    /// The silence has ended.
    Expired,
}

impl SilenceState {
    /// Returns the state as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for SilenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the state of a window `[starts_at, ends_at)` at `now`.
///
/// Total over every ordering of the three instants; a degenerate window
/// (`starts_at == ends_at`) is never active.
#[must_use]
pub fn compute_state(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> SilenceState {
    if now < starts_at {
        SilenceState::Pending
    } else if now < ends_at {
        SilenceState::Active
    } else {
        SilenceState::Expired
    }
}

/// Seconds from `0001-01-01T00:00:00Z`, Alertmanager's zero time, to the epoch.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// Returns true for timestamps that were never set.
///
/// Exactly two instants count as unset: the Unix epoch (the `Default` for
/// `DateTime<Utc>`) and Alertmanager's zero time `0001-01-01T00:00:00Z`.
#[must_use]
pub fn is_unset(t: &DateTime<Utc>) -> bool {
    *t == DateTime::<Utc>::default()
        || (t.timestamp() == ZERO_TIME_SECS && t.timestamp_subsec_nanos() == 0)
}

/// Returns true if a window ending at `ends_at` has ended by `now`.
///
/// An unset end time never resolves.
#[must_use]
pub fn is_resolved_at(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    !is_unset(&ends_at) && now >= ends_at
}

/// Wire wrapper around the state, as Alertmanager nests it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilenceStatus {
    /// The state at the time the silence was last evaluated.
    pub state: SilenceState,
}

/// A silence that suppresses alerts whose labels match its matchers.
///
/// Deleting a silence is done by ending it now, not by removing it.
/// Deserialization rejects inverted windows and recomputes `status` from the
/// clock; the incoming state is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ApiSilence")]
pub struct Silence {
    /// Identifier assigned by the silence store; empty until submitted.
    #[serde(default)]
    pub id: String,
    /// Alerts matching all of these are silenced.
    pub matchers: Matchers,
    /// When the silence starts.
    pub starts_at: DateTime<Utc>,
    /// When the silence ends.
    pub ends_at: DateTime<Utc>,
    /// When the silence was last changed.
    pub updated_at: DateTime<Utc>,
    /// Who created the silence.
    pub created_by: String,
    /// Why the silence was created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// State as of `updated_at` or the last refresh.
    pub status: SilenceStatus,
}

/// Silence as it arrives on the wire, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSilence {
    #[serde(default)]
    id: String,
    matchers: Matchers,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    #[serde(default)]
    comment: String,
}

impl TryFrom<ApiSilence> for Silence {
    type Error = SilenceError;

    // An expired silence may have an empty window, so only inversion is rejected.
    fn try_from(api: ApiSilence) -> Result<Self> {
        if api.ends_at < api.starts_at {
            return Err(SilenceError::InvalidWindow {
                reason: "silence end time is before its start time".to_string(),
            });
        }

        Ok(Self {
            id: api.id,
            matchers: api.matchers,
            starts_at: api.starts_at,
            ends_at: api.ends_at,
            updated_at: api.updated_at,
            created_by: api.created_by,
            comment: api.comment,
            status: SilenceStatus {
                state: compute_state(api.starts_at, api.ends_at, Utc::now()),
            },
        })
    }
}

impl Silence {
    /// Creates a new silence evaluated against the current time.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::InvalidWindow` if `ends_at` is not after `starts_at`.
    pub fn new(
        matchers: Matchers,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        created_by: impl Into<String>,
        comment: impl Into<String>,
    ) -> Result<Self> {
        Self::new_at(matchers, starts_at, ends_at, created_by, comment, Utc::now())
    }

    /// Creates a new silence evaluated against `now`.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::InvalidWindow` if `ends_at` is not after `starts_at`.
    pub fn new_at(
        matchers: Matchers,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        created_by: impl Into<String>,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if ends_at <= starts_at {
            return Err(SilenceError::InvalidWindow {
                reason: "silence end time must be after start time".to_string(),
            });
        }

        Ok(Self {
            id: String::new(),
            matchers,
            starts_at,
            ends_at,
            updated_at: now,
            created_by: created_by.into(),
            comment: comment.into(),
            status: SilenceStatus {
                state: compute_state(starts_at, ends_at, now),
            },
        })
    }

    /// Returns the same silence carrying the given ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the state at `now`.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> SilenceState {
        compute_state(self.starts_at, self.ends_at, now)
    }

    /// Returns the state right now.
    #[must_use]
    pub fn state(&self) -> SilenceState {
        self.state_at(Utc::now())
    }

    /// Returns the silence with its status recomputed for `now`.
    #[must_use]
    pub fn refreshed(mut self, now: DateTime<Utc>) -> Self {
        self.status.state = self.state_at(now);
        self
    }

    /// Returns true if the silence has ended by `now`.
    ///
    /// A silence whose end time was never set is never resolved.
    #[must_use]
    pub fn is_resolved_at(&self, now: DateTime<Utc>) -> bool {
        is_resolved_at(self.ends_at, now)
    }

    /// Returns true if the silence has ended.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.is_resolved_at(Utc::now())
    }

    /// Returns the silence ended at `now`.
    ///
    /// A pending silence also has its start moved to `now`.
    #[must_use]
    pub fn expired_at(mut self, now: DateTime<Utc>) -> Self {
        if now < self.starts_at {
            self.starts_at = now;
        }
        if now < self.ends_at {
            self.ends_at = now;
        }
        self.updated_at = now;
        self.refreshed(now)
    }

    /// Returns the length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ends_at - self.starts_at
    }

    /// Checks if the silence is active at `now` and matches the labels.
    #[must_use]
    pub fn matches_at(&self, labels: &LabelSet, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SilenceState::Active && self.matchers.matches(labels)
    }

    /// Checks if the silence currently suppresses an alert with these labels.
    #[must_use]
    pub fn matches(&self, labels: &LabelSet) -> bool {
        self.matches_at(labels, Utc::now())
    }
}

/// Orders silences so the latest-ending come first.
pub fn sort_by_ends_at_desc(silences: &mut [Silence]) {
    silences.sort_by(|a, b| b.ends_at.cmp(&a.ends_at));
}

/// Fixed silence lengths offered to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SilencePreset {
    /// Two hours.
    #[serde(rename = "2h")]
    TwoHours,
    /// Forty-eight hours.
    #[serde(rename = "48h")]
    FortyEightHours,
    /// Two weeks.
    #[serde(rename = "2w")]
    TwoWeeks,
}

impl SilencePreset {
    /// Returns the preset as its short name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwoHours => "2h",
            Self::FortyEightHours => "48h",
            Self::TwoWeeks => "2w",
        }
    }

    /// Returns the length of the preset.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::TwoHours => Duration::hours(2),
            Self::FortyEightHours => Duration::hours(48),
            Self::TwoWeeks => Duration::weeks(2),
        }
    }
}

impl fmt::Display for SilencePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SilencePreset {
    type Err = SilenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2h" => Ok(Self::TwoHours),
            "48h" => Ok(Self::FortyEightHours),
            "2w" => Ok(Self::TwoWeeks),
            other => Err(SilenceError::InvalidWindow {
                reason: format!("unknown silence preset '{other}', expected 2h, 48h or 2w"),
            }),
        }
    }
}
