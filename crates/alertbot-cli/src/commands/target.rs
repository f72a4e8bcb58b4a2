//! Target command implementation.
//!
//! Loads current alerts from a JSON file and builds a silence for the one
//! with the given fingerprint.

use std::fs;
use std::io::Write;
use std::path::Path;

use alertbot_matchers::LabelSet;
use alertbot_silence::{
    CandidateAlert, MemorySilenceStore, SilenceConfig, SilencePreset, SilenceService,
    StaticAlertSource,
};
use serde::Deserialize;
use tracing::debug;

use crate::cli::TargetArgs;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the target command.
#[derive(Debug)]
pub struct TargetCommand<'a> {
    config: &'a SilenceConfig,
}

impl<'a> TargetCommand<'a> {
    /// Creates a new target command handler.
    #[must_use]
    pub const fn new(config: &'a SilenceConfig) -> Self {
        Self { config }
    }

    /// Builds and writes the silence for one alert.
    ///
    /// # Errors
    ///
    /// Returns error if the alerts file cannot be loaded, the preset is
    /// unknown, or no alert has the fingerprint.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &TargetArgs,
    ) -> Result<(), CliError> {
        let preset: SilencePreset = args.preset.parse()?;
        let alerts = load_alerts(&args.alerts)?;
        debug!(count = alerts.len(), path = %args.alerts.display(), "loaded alerts");

        let service = SilenceService::with_config(
            StaticAlertSource::new(alerts),
            MemorySilenceStore::new(),
            self.config.clone(),
        )?;

        let silence = service.silence_alert_for(&args.fingerprint, preset)?;
        format.write(out, &silence)
    }
}

/// An alert entry in the alerts file.
///
/// Labels are either already in matcher syntax or a name to value map.
#[derive(Debug, Clone, Deserialize)]
struct AlertRecord {
    fingerprint: String,
    labels: AlertLabels,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AlertLabels {
    Rendered(String),
    Set(LabelSet),
}

impl From<AlertRecord> for CandidateAlert {
    fn from(record: AlertRecord) -> Self {
        match record.labels {
            AlertLabels::Rendered(labels) => Self::new(record.fingerprint, labels),
            AlertLabels::Set(labels) => Self::from_labels(record.fingerprint, &labels),
        }
    }
}

/// Loads candidate alerts from a JSON array.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read and
/// `CliError::InvalidArgument` if it is not a valid alert list.
pub fn load_alerts(path: &Path) -> Result<Vec<CandidateAlert>, CliError> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<AlertRecord> = serde_json::from_str(&raw).map_err(|e| {
        CliError::InvalidArgument(format!("alerts file {}: {e}", path.display()))
    })?;
    Ok(records.into_iter().map(CandidateAlert::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use alertbot_silence::SilenceError;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const ALERTS: &str = r#"[
        {"fingerprint": "aaa111", "labels": "{alertname=\"DiskFull\", instance=\"db-1\"}"},
        {"fingerprint": "bbb222", "labels": {"alertname": "HighCPU", "env": "prod"}}
    ]"#;

    fn alerts_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run(file: &NamedTempFile, fingerprint: &str, preset: &str) -> Result<String, CliError> {
        let config = SilenceConfig::default();
        let args = TargetArgs {
            fingerprint: fingerprint.to_string(),
            alerts: file.path().to_path_buf(),
            preset: preset.to_string(),
        };
        let mut buf = Vec::new();
        TargetCommand::new(&config).execute(&mut buf, &OutputFormat::new(Format::Json), &args)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn loads_both_label_shapes() {
        let file = alerts_file(ALERTS);
        let alerts = load_alerts(file.path()).unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].labels, r#"{alertname="DiskFull", instance="db-1"}"#);
        assert_eq!(alerts[1].labels, r#"{alertname="HighCPU", env="prod"}"#);
    }

    #[test]
    fn silences_alert_for_preset() {
        let file = alerts_file(ALERTS);
        let out = run(&file, "bbb222", "48h").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["matchers"].as_array().unwrap().len(), 2);
        assert_eq!(value["matchers"][0]["name"], "alertname");
        assert_eq!(value["matchers"][0]["value"], "HighCPU");
        assert_eq!(value["comment"], "Enacted by administrator command");
    }

    #[test]
    fn unknown_fingerprint() {
        let file = alerts_file(ALERTS);
        let err = run(&file, "zzz999", "2h").unwrap_err();
        assert!(matches!(
            err,
            CliError::Silence(SilenceError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_file_is_no_alerts() {
        let file = alerts_file("[]");
        let err = run(&file, "aaa111", "2h").unwrap_err();
        assert_eq!(err.to_string(), "no alerts found right now");
    }

    #[test]
    fn unknown_preset() {
        let file = alerts_file(ALERTS);
        let err = run(&file, "aaa111", "3d").unwrap_err();
        assert!(matches!(
            err,
            CliError::Silence(SilenceError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn malformed_file() {
        let file = alerts_file(r#"{"not": "a list"}"#);
        let res = load_alerts(file.path());
        assert!(matches!(res, Err(CliError::InvalidArgument(_))));
    }
}
