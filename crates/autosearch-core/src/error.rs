// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the autosearch decision engine.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across the autosearch crates.
///
/// Decision calls never return this type: model-path failures are absorbed by
/// the arbiter. It surfaces from construction (configuration) and from
/// adapter operations such as health checks.
#[derive(Debug, Error)]
pub enum AutosearchError {
    /// Invalid configuration values (threshold out of range, zero retries, bad host).
    #[error("configuration error: {0}")]
    Config(String),

    /// A model classifier call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Adapter health check failed.
    #[error("health check failed for {name}: {message}")]
    HealthCheckFailed { name: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Recoverable failures of a single model classifier attempt.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The attempt exceeded its deadline and was cancelled.
    #[error("model request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Transport failure or non-success response from the classifier service.
    #[error("model unreachable: {message}")]
    Unreachable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response arrived but did not contain a usable decision.
    #[error("failed to parse model response: {reason}")]
    Parse { reason: String, raw: String },
}

impl ModelError {
    /// Whether another attempt may succeed. Every model-path failure is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModelError::Timeout { .. } | ModelError::Unreachable { .. } | ModelError::Parse { .. }
        )
    }

    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::Timeout { .. } => "timeout",
            ModelError::Unreachable { .. } => "unreachable",
            ModelError::Parse { .. } => "parse",
        }
    }

    /// Convenience constructor for unreachable errors without a source.
    pub fn unreachable(message: impl Into<String>) -> Self {
        ModelError::Unreachable {
            message: message.into(),
            source: None,
        }
    }
}
