// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and positive search horizons.

use crate::diagnostic::ConfigError;
use crate::model::ThreadflowConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ThreadflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.queue.horizon_days == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.horizon_days must be at least 1".to_string(),
        });
    }

    if config.queue.generation_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.generation_limit must be at least 1".to_string(),
        });
    }

    if config.dispatch.cron.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "dispatch.cron must not be empty".to_string(),
        });
    }

    // The threads section is optional as a whole, but half a credential
    // pair is always a mistake.
    match (&config.threads.app_id, &config.threads.app_secret) {
        (Some(_), None) => errors.push(ConfigError::Validation {
            message: "threads.app_secret is required when threads.app_id is set".to_string(),
        }),
        (None, Some(_)) => errors.push(ConfigError::Validation {
            message: "threads.app_id is required when threads.app_secret is set".to_string(),
        }),
        _ => {}
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ThreadflowConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ThreadflowConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn zero_horizon_fails_validation() {
        let mut config = ThreadflowConfig::default();
        config.queue.horizon_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("horizon_days"))
        ));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = ThreadflowConfig::default();
        config.app.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn half_a_threads_credential_pair_fails() {
        let mut config = ThreadflowConfig::default();
        config.threads.app_id = Some("12345".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("app_secret"))
        ));
    }

    #[test]
    fn full_threads_credential_pair_passes() {
        let mut config = ThreadflowConfig::default();
        config.threads.app_id = Some("12345".to_string());
        config.threads.app_secret = Some("shhh".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn sections_default_when_missing() {
        let toml_str = r#"
[app]
name = "custom"
"#;
        let config: ThreadflowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.name, "custom");
        assert_eq!(config.queue.horizon_days, 365);
        assert_eq!(config.dispatch.cron, "0 * * * *");
    }

    #[test]
    fn unknown_fields_are_denied() {
        let toml_str = r#"
[dispatch]
enabled = true
cadence = "hourly"
"#;
        let result = toml::from_str::<ThreadflowConfig>(toml_str);
        assert!(result.is_err());
    }
}
