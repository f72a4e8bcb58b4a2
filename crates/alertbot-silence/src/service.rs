//! Silencing service tying alert sources and silence sinks together.

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::builder::{
    build_blanket_silence, build_targeted_silence, find_candidate, CandidateAlert,
};
use crate::config::SilenceConfig;
use crate::error::{Result, SilenceError};
use crate::types::{Silence, SilencePreset};
use crate::upstream::{AlertSource, SilenceSink};

/// ID reported when no maintenance silence is active.
const MAINTENANCE: &str = "maintenance";

/// Builds silences from current alerts and hands them to a sink.
///
/// At most one maintenance silence is tracked at a time.
#[derive(Debug)]
pub struct SilenceService<A, S> {
    source: A,
    sink: S,
    config: SilenceConfig,
    maintenance: RwLock<Option<String>>,
}

impl<A: AlertSource, S: SilenceSink> SilenceService<A, S> {
    /// Creates a service with the default configuration.
    pub fn new(source: A, sink: S) -> Self {
        Self {
            source,
            sink,
            config: SilenceConfig::default(),
            maintenance: RwLock::new(None),
        }
    }

    /// Creates a service with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(source: A, sink: S, config: SilenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            sink,
            config,
            maintenance: RwLock::new(None),
        })
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &SilenceConfig {
        &self.config
    }

    /// Returns the alert source.
    pub const fn source(&self) -> &A {
        &self.source
    }

    /// Returns the silence sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the ID of the active maintenance silence, if any.
    pub fn maintenance_id(&self) -> Option<String> {
        self.maintenance.read().clone()
    }

    /// Looks up a current alert by fingerprint.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::Upstream` if alerts cannot be listed,
    /// `SilenceError::NoAlerts` if none are firing, or
    /// `SilenceError::NotFound` if none has the fingerprint.
    pub fn find_alert(&self, fingerprint: &str) -> Result<CandidateAlert> {
        let alerts = self.source.list_current_alerts()?;
        find_candidate(fingerprint, &alerts).cloned()
    }

    /// Silences the alert with `fingerprint` for `duration` from now.
    ///
    /// Returns the submitted silence carrying the ID the sink assigned.
    ///
    /// # Errors
    ///
    /// Returns any error from listing alerts, building the silence, or
    /// submitting it.
    pub fn silence_alert(&self, fingerprint: &str, duration: Duration) -> Result<Silence> {
        let alerts = self.source.list_current_alerts()?;
        let silence =
            build_targeted_silence(fingerprint, duration, &alerts, Utc::now(), &self.config)
                .inspect_err(|e| {
                    warn!(fingerprint = %fingerprint, error = %e, "cannot silence alert");
                })?;

        let id = self.sink.submit(&silence)?;
        info!(silence_id = %id, fingerprint = %fingerprint, "silenced alert");
        Ok(silence.with_id(id))
    }

    /// Silences the alert with `fingerprint` for a preset duration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::silence_alert`].
    pub fn silence_alert_for(&self, fingerprint: &str, preset: SilencePreset) -> Result<Silence> {
        self.silence_alert(fingerprint, preset.duration())
    }

    /// Starts a maintenance window that silences every alert.
    ///
    /// `hours` outside the configured bounds fall back to the default. A
    /// maintenance silence that is already running is withdrawn first.
    ///
    /// # Errors
    ///
    /// Returns any error from withdrawing the previous silence or submitting
    /// the new one.
    pub fn start_maintenance(&self, hours: Option<i64>) -> Result<Silence> {
        let duration = self.config.maintenance_duration(hours)?;
        let silence = build_blanket_silence(duration, Utc::now(), &self.config)?;

        let mut maintenance = self.maintenance.write();
        if let Some(previous) = maintenance.take() {
            match self.sink.withdraw(&previous) {
                Ok(()) | Err(SilenceError::SilenceNotFound { .. }) => {}
                Err(e) => {
                    *maintenance = Some(previous);
                    return Err(e);
                }
            }
        }

        let id = self.sink.submit(&silence)?;
        info!(
            silence_id = %id,
            hours = duration.num_hours(),
            "started maintenance"
        );
        *maintenance = Some(id.clone());
        Ok(silence.with_id(id))
    }

    /// Ends the current maintenance window.
    ///
    /// Returns the ID of the withdrawn silence.
    ///
    /// # Errors
    ///
    /// Returns `SilenceError::SilenceNotFound` if no maintenance is active,
    /// or any error from withdrawing the silence.
    pub fn stop_maintenance(&self) -> Result<String> {
        let mut maintenance = self.maintenance.write();
        let Some(id) = maintenance.clone() else {
            return Err(SilenceError::SilenceNotFound {
                id: MAINTENANCE.to_string(),
            });
        };

        self.sink.withdraw(&id)?;
        *maintenance = None;
        info!(silence_id = %id, "stopped maintenance");
        Ok(id)
    }
}
