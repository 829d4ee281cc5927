// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every check runs and every violation is reported, so a broken file can be fixed
//! in one pass.

use crate::{ConfigError, ConfigResult, VoxctlConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Quantization resolution (`snn.array_size >= 1`)
/// - Converter descriptors (frequency ranges, moving-average window)
/// - Known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &VoxctlConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_snn(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_snn(config: &VoxctlConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.snn.array_size == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "snn.array_size".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if let Err(e) = config.snn.encoder.validate() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "snn.encoder".to_string(),
            reason: e.to_string(),
        });
    }
    if let Err(e) = config.snn.decoder.validate() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "snn.decoder".to_string(),
            reason: e.to_string(),
        });
    }
}

fn validate_logging(config: &VoxctlConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}
