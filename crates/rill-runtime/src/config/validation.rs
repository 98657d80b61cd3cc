//! Configuration validation utilities.

use tracing_subscriber::filter::Directive;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, RillConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &RillConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File {
        let path = logging
            .file_path
            .as_ref()
            .ok_or_else(|| ConfigError::missing_field("logging.file_path"))?;

        if path.file_name().is_none() {
            return Err(ConfigError::validation(format!(
                "Log file path has no file name: {}",
                path.display()
            )));
        }

        if logging.max_files == 0 {
            return Err(ConfigError::validation(
                "logging.max_files must be greater than 0",
            ));
        }
    }

    for (module, level) in &logging.filters {
        validate_directive(module, level.as_str())?;
    }

    Ok(())
}

fn validate_directive(module: &str, level: &str) -> ConfigResult<()> {
    if module.is_empty() || module.contains(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Invalid log filter target: {module:?}"
        )));
    }

    format!("{module}={level}")
        .parse::<Directive>()
        .map(|_| ())
        .map_err(|e| ConfigError::validation(format!("Invalid log filter {module:?}: {e}")))
}
