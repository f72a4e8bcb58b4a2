//! Collaborators that feed alerts in and take silences out.
//!
//! This module provides the [`AlertSource`] and [`SilenceSink`] traits plus
//! in-memory implementations. Network-backed implementations live with the
//! caller; their failures are reported as `SilenceError::Upstream`.

use std::collections::HashMap;
use std::fmt;

use alertbot_matchers::LabelSet;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::builder::CandidateAlert;
use crate::error::{Result, SilenceError};
use crate::types::{sort_by_ends_at_desc, Silence, SilenceState};

/// Supplies the alerts that are currently firing.
pub trait AlertSource: Send + Sync + fmt::Debug {
    /// Lists current alerts.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::Upstream` if the alerts cannot be fetched.
    fn list_current_alerts(&self) -> Result<Vec<CandidateAlert>>;
}

/// Accepts new silences and withdraws existing ones.
pub trait SilenceSink: Send + Sync + fmt::Debug {
    /// Submits a silence and returns the ID it is stored under.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::Upstream` if the silence is rejected.
    fn submit(&self, silence: &Silence) -> Result<String>;

    /// Withdraws a silence by ending it now.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::Upstream` if the request fails, or
    /// `SilenceError::SilenceNotFound` if the sink knows no such silence.
    fn withdraw(&self, id: &str) -> Result<()>;
}

/// An alert source over a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticAlertSource {
    alerts: Vec<CandidateAlert>,
}

impl StaticAlertSource {
    /// Creates a source that always returns `alerts`.
    #[must_use]
    pub const fn new(alerts: Vec<CandidateAlert>) -> Self {
        Self { alerts }
    }
}

impl AlertSource for StaticAlertSource {
    fn list_current_alerts(&self) -> Result<Vec<CandidateAlert>> {
        Ok(self.alerts.clone())
    }
}

/// A silence sink that keeps silences in memory.
///
/// Submitted silences without an ID get a fresh UUID. Withdrawn silences
/// stay in the store, ended at the time of withdrawal.
#[derive(Debug, Default)]
pub struct MemorySilenceStore {
    silences: RwLock<HashMap<String, Silence>>,
}

impl MemorySilenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a silence by ID with its state refreshed.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Silence> {
        let silences = self.silences.read();
        silences.get(id).cloned().map(|s| s.refreshed(Utc::now()))
    }

    /// Returns all silences, latest-ending first, with states refreshed.
    #[must_use]
    pub fn list(&self) -> Vec<Silence> {
        let now = Utc::now();
        let mut list: Vec<Silence> = {
            let silences = self.silences.read();
            silences.values().cloned().map(|s| s.refreshed(now)).collect()
        };
        sort_by_ends_at_desc(&mut list);
        list
    }

    /// Returns silences that are active right now.
    #[must_use]
    pub fn active(&self) -> Vec<Silence> {
        self.list()
            .into_iter()
            .filter(|s| s.status.state == SilenceState::Active)
            .collect()
    }

    /// Checks if any active silence matches the labels.
    #[must_use]
    pub fn is_silenced(&self, labels: &LabelSet) -> bool {
        let now = Utc::now();
        let silences = self.silences.read();
        silences.values().any(|s| s.matches_at(labels, now))
    }

    /// Returns the number of stored silences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.silences.read().len()
    }

    /// Returns true if no silences are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.silences.read().is_empty()
    }
}

impl SilenceSink for MemorySilenceStore {
    fn submit(&self, silence: &Silence) -> Result<String> {
        let now = Utc::now();
        let id = if silence.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            silence.id.clone()
        };

        let mut stored = silence.clone().with_id(id.clone()).refreshed(now);
        stored.updated_at = now;

        info!(
            silence_id = %id,
            matchers = %stored.matchers,
            ends_at = %stored.ends_at,
            "stored silence"
        );
        self.silences.write().insert(id.clone(), stored);
        Ok(id)
    }

    fn withdraw(&self, id: &str) -> Result<()> {
        let mut silences = self.silences.write();
        let Some(existing) = silences.remove(id) else {
            return Err(SilenceError::SilenceNotFound { id: id.to_string() });
        };

        let expired = existing.expired_at(Utc::now());
        debug!(silence_id = %id, ends_at = %expired.ends_at, "expired silence");
        silences.insert(id.to_string(), expired);
        Ok(())
    }
}
