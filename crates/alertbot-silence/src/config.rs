//! Configuration for building silences.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SilenceError};

/// Author stamped on silences built by the service.
pub const DEFAULT_CREATED_BY: &str = "alertmanager-bot";

/// Comment stamped on silences built by the service.
pub const DEFAULT_COMMENT: &str = "Enacted by administrator command";

/// Upper bound for `maintenance_max_hours`: one year.
pub const MAX_MAINTENANCE_HOURS: i64 = 24 * 365;

/// Settings shared by every silence the service builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilenceConfig {
    /// Author recorded on each silence.
    pub created_by: String,
    /// Comment recorded on each silence.
    pub comment: String,
    /// Maintenance length when no valid number of hours is requested.
    pub maintenance_default_hours: i64,
    /// Longest maintenance window that may be requested, in hours.
    pub maintenance_max_hours: i64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            created_by: DEFAULT_CREATED_BY.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            maintenance_default_hours: 8,
            maintenance_max_hours: 24,
        }
    }
}

impl SilenceConfig {
    /// Sets the author.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Checks that the maintenance bounds are usable.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::InvalidConfig` if the author is empty, the
    /// maximum lies outside `1..=MAX_MAINTENANCE_HOURS`, or the default lies
    /// outside `1..=max`.
    pub fn validate(&self) -> Result<()> {
        if self.created_by.trim().is_empty() {
            return Err(SilenceError::InvalidConfig {
                reason: "created_by cannot be empty".to_string(),
            });
        }
        if !(1..=MAX_MAINTENANCE_HOURS).contains(&self.maintenance_max_hours) {
            return Err(SilenceError::InvalidConfig {
                reason: format!(
                    "maintenance_max_hours must be between 1 and {MAX_MAINTENANCE_HOURS}, got {}",
                    self.maintenance_max_hours
                ),
            });
        }
        if !(1..=self.maintenance_max_hours).contains(&self.maintenance_default_hours) {
            return Err(SilenceError::InvalidConfig {
                reason: format!(
                    "maintenance_default_hours must be between 1 and {}, got {}",
                    self.maintenance_max_hours, self.maintenance_default_hours
                ),
            });
        }
        Ok(())
    }

    /// Resolves a requested maintenance length.
    ///
    /// Requests outside `1..=maintenance_max_hours`, or no request at all,
    /// fall back to `maintenance_default_hours`.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::InvalidWindow` if the resolved number of hours
    /// does not fit in a `Duration`, which only an unvalidated config allows.
    pub fn maintenance_duration(&self, requested_hours: Option<i64>) -> Result<Duration> {
        let hours = requested_hours
            .filter(|h| (1..=self.maintenance_max_hours).contains(h))
            .unwrap_or(self.maintenance_default_hours);
        Duration::try_hours(hours).ok_or_else(|| SilenceError::InvalidWindow {
            reason: format!("maintenance of {hours} hours is out of range"),
        })
    }
}
