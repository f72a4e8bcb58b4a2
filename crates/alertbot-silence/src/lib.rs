//! Silence lifecycle for Alertmanager-style alerting.
//!
//! `alertbot-silence` models time-bounded silences over matcher lists, derives
//! their state from the clock, and builds the two kinds of silence an operator
//! asks for: a blanket silence over every alert for a maintenance window, and
//! a targeted silence over a single alert picked by fingerprint.
//!
//! # Features
//!
//! - **State from the clock**: pending, active or expired, never stored stale
//! - **Blanket silences**: `alertname=~".+"` for a bounded number of hours
//! - **Targeted silences**: equality matchers taken from a current alert's labels
//! - **Collaborator traits**: [`AlertSource`] and [`SilenceSink`], with in-memory implementations
//!
//! # Example
//!
//! ```rust
//! use alertbot_silence::{
//!     CandidateAlert, MemorySilenceStore, SilencePreset, SilenceService, SilenceState,
//!     StaticAlertSource,
//! };
//!
//! let source = StaticAlertSource::new(vec![CandidateAlert::new(
//!     "3c4f1b2a",
//!     r#"{alertname="HighCPU", instance="web-1"}"#,
//! )]);
//! let service = SilenceService::new(source, MemorySilenceStore::new());
//!
//! let silence = service.silence_alert_for("3c4f1b2a", SilencePreset::TwoHours).unwrap();
//! assert_eq!(silence.status.state, SilenceState::Active);
//! assert_eq!(silence.matchers.len(), 2);
//!
//! let maintenance = service.start_maintenance(Some(4)).unwrap();
//! assert_eq!(service.maintenance_id(), Some(maintenance.id.clone()));
//! service.stop_maintenance().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod service;
pub mod types;
pub mod upstream;


// Re-export main types at crate root
pub use builder::{
    build_blanket_silence, build_targeted_silence, find_candidate, CandidateAlert, MATCH_ALL,
};
pub use config::{SilenceConfig, DEFAULT_COMMENT, DEFAULT_CREATED_BY, MAX_MAINTENANCE_HOURS};
pub use error::{Result, SilenceError};
pub use service::SilenceService;
pub use types::{
    compute_state, is_resolved_at, is_unset, sort_by_ends_at_desc, Silence, SilencePreset,
    SilenceState, SilenceStatus,
};
pub use upstream::{AlertSource, MemorySilenceStore, SilenceSink, StaticAlertSource};
