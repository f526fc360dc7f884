// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, numeric ranges, and log level names.

use crate::diagnostic::ConfigError;
use crate::model::AutosearchConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AutosearchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.model.host.trim();
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("model.host `{host}` must start with http:// or https://"),
        });
    }

    if config.model.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "model.name must not be empty".to_string(),
        });
    }

    let temperature = config.model.temperature;
    if !(temperature.is_finite() && (0.0..=2.0).contains(&temperature)) {
        errors.push(ConfigError::Validation {
            message: format!("model.temperature must be within [0, 2], got {temperature}"),
        });
    }

    if config.model.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "model.max_output_tokens must be greater than 0".to_string(),
        });
    }

    let threshold = config.decision.confidence_threshold;
    if !(threshold.is_finite() && (0.0..=1.0).contains(&threshold)) {
        errors.push(ConfigError::Validation {
            message: format!("decision.confidence_threshold must be within [0, 1], got {threshold}"),
        });
    }

    if config.decision.max_retries < 1 {
        errors.push(ConfigError::Validation {
            message: "decision.max_retries must be at least 1".to_string(),
        });
    }

    if config.decision.timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "decision.timeout_ms must be greater than 0".to_string(),
        });
    }

    let level = config.service.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` must be one of: {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
