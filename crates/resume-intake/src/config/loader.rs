use std::path::Path;

use log::debug;

use crate::config::schema::Config;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

/// Upper bound for `events.channelCapacity`; the broadcast ring buffer is allocated up front.
pub const MAX_CHANNEL_CAPACITY: usize = 65_536;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Loading config from {}", crate::sanitize::redact_path(path));
    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();

    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.analysis.timeout_ms == Some(0) {
        return Err(ConfigError::Validation {
            message: "analysis.timeoutMs must be greater than 0 (use null to disable)"
                .to_string(),
        });
    }

    if config.events.channel_capacity == 0 {
        return Err(ConfigError::Validation {
            message: "events.channelCapacity must be greater than 0".to_string(),
        });
    }

    if config.events.channel_capacity > MAX_CHANNEL_CAPACITY {
        return Err(ConfigError::Validation {
            message: format!(
                "events.channelCapacity must be at most {}, got {}",
                MAX_CHANNEL_CAPACITY, config.events.channel_capacity
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.analysis.simulated_delay_ms, 3000);
    }

    #[test]
    fn test_load_full_config() {
        let json = r#"{
            "version": "1.0",
            "analysis": { "timeoutMs": 5000, "simulatedDelayMs": 250 },
            "presentation": { "handoffDelayMs": 0 },
            "events": { "channelCapacity": 8 }
        }"#;

        let config = load_config_from_str(json).unwrap();
        assert_eq!(config.analysis.timeout_ms, Some(5000));
        assert_eq!(config.analysis.simulated_delay_ms, 250);
        assert_eq!(config.presentation.handoff_delay_ms, 0);
        assert_eq!(config.events.channel_capacity, 8);
    }

    #[test]
    fn test_invalid_json() {
        let result = load_config_from_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_schema_rejects_unknown_field() {
        let result = load_config_from_str(r#"{"version": "1.0", "uploadDir": "/tmp"}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_schema_rejects_missing_version() {
        let result = load_config_from_str(r#"{"analysis": {}}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_schema_rejects_zero_timeout() {
        let result = load_config_from_str(r#"{"version": "1.0", "analysis": {"timeoutMs": 0}}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_unsupported_version() {
        let result = load_config_from_str(r#"{"version": "2.0"}"#);
        match result {
            Err(ConfigError::Validation { message }) => {
                assert!(message.contains("Unsupported config version"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_rejects_oversized_channel() {
        let result = load_config_from_str(
            r#"{"version": "1.0", "events": {"channelCapacity": 9223372036854775808}}"#,
        );
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_validate_rejects_oversized_channel() {
        let mut config = Config::default();
        config.events.channel_capacity = MAX_CHANNEL_CAPACITY + 1;

        match validate_config(&config) {
            Err(ConfigError::Validation { message }) => {
                assert!(message.contains("at most 65536"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }

        config.events.channel_capacity = MAX_CHANNEL_CAPACITY;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"version": "1.0", "events": {{"channelCapacity": 16}}}}"#).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.events.channel_capacity, 16);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/resume-intake.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
