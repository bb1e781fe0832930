//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{HeraldConfig, LogLevel, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HeraldConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;

    let default_command = config.dispatch.default_command.as_deref();
    if default_command.is_some_and(|name| name.trim().is_empty()) {
        return Err(ConfigError::validation(
            "dispatch.default_command must not be empty",
        ));
    }

    Ok(())
}

/// Validates logging configuration.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    for (target, level) in &logging.filters {
        if target.is_empty() {
            return Err(ConfigError::validation("Log filter target must not be empty"));
        }
        if !LogLevel::NAMES.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(format!(
                "Invalid log level for '{target}': {level}. Valid values are: {:?}",
                LogLevel::NAMES
            )));
        }
    }

    if logging.output == LogOutput::File {
        match &logging.file_path {
            None => {
                return Err(ConfigError::validation(
                    "logging.file_path is required when logging.output is 'file'",
                ));
            }
            Some(path) if path.file_name().is_none() => {
                return Err(ConfigError::validation(format!(
                    "logging.file_path must name a file: {}",
                    path.display()
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}
