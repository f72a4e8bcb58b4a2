//! Maintenance command implementation.
//!
//! Builds the blanket silence for a maintenance window. Silences are kept in
//! an in-memory store, so nothing is sent to an Alertmanager.

use std::io::Write;

use alertbot_silence::{MemorySilenceStore, SilenceConfig, SilenceService, StaticAlertSource};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the maintenance command.
#[derive(Debug)]
pub struct MaintenanceCommand<'a> {
    config: &'a SilenceConfig,
}

impl<'a> MaintenanceCommand<'a> {
    /// Creates a new maintenance command handler.
    #[must_use]
    pub const fn new(config: &'a SilenceConfig) -> Self {
        Self { config }
    }

    /// Builds and writes the maintenance silence.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or writing fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        hours: Option<i64>,
    ) -> Result<(), CliError> {
        let service = SilenceService::with_config(
            StaticAlertSource::default(),
            MemorySilenceStore::new(),
            self.config.clone(),
        )?;

        let silence = service.start_maintenance(hours)?;
        format.write(out, &silence)
    }
}
