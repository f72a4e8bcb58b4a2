//! Resolution of silence settings from file, environment and flags.

use std::fs;
use std::path::Path;

use alertbot_silence::SilenceConfig;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

/// Loads a [`SilenceConfig`] from a JSON file.
///
/// Missing fields take their defaults.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read and `CliError::Config`
/// if it is not valid JSON.
pub fn load_config_file(path: &Path) -> Result<SilenceConfig, CliError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Builds the effective configuration for a command line.
///
/// Starts from the defaults, applies the `--config` file if given, then any
/// flag or `ALERTBOT_*` variable, and validates the result.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn resolve_config(cli: &Cli) -> Result<SilenceConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => SilenceConfig::default(),
    };

    if let Some(created_by) = &cli.created_by {
        config.created_by.clone_from(created_by);
    }
    if let Some(comment) = &cli.comment {
        config.comment.clone_from(comment);
    }
    if let Some(hours) = cli.maintenance_default_hours {
        config.maintenance_default_hours = hours;
    }
    if let Some(hours) = cli.maintenance_max_hours {
        config.maintenance_max_hours = hours;
    }

    config.validate()?;
    debug!(
        created_by = %config.created_by,
        maintenance_default_hours = config.maintenance_default_hours,
        maintenance_max_hours = config.maintenance_max_hours,
        "resolved configuration"
    );
    Ok(config)
}
