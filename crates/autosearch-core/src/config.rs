// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validated, immutable decision configuration.
//!
//! A [`SearchConfig`] can only be obtained through [`SearchConfig::new`],
//! [`SearchConfig::default`], or [`SearchConfig::with_overrides`], all of which
//! validate their inputs. Decision code can therefore rely on every field
//! being in range.

use std::time::Duration;

use crate::error::AutosearchError;

/// Default model classifier endpoint.
pub const DEFAULT_MODEL_HOST: &str = "http://localhost:11434";
/// Default model classifier model name.
pub const DEFAULT_MODEL_NAME: &str = "qwen2.5vl:3b";
/// Default score at or above which a search is recommended.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;
/// Default number of model attempts per decision.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default per-attempt deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Decision configuration shared by the arbiter and the model classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    model_host: String,
    model_name: String,
    confidence_threshold: f64,
    max_retries: u32,
    timeout_ms: u64,
}

/// Per-instance overrides applied on top of an existing [`SearchConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub model_host: Option<String>,
    pub model_name: Option<String>,
    pub confidence_threshold: Option<f64>,
    pub max_retries: Option<u32>,
    pub timeout_ms: Option<u64>,
}

impl SearchConfig {
    /// Build a configuration, rejecting out-of-range values.
    ///
    /// # Errors
    /// Returns [`AutosearchError::Config`] when the host is not an http(s) URL,
    /// the model name is empty, the threshold is outside `[0, 1]`, or the retry
    /// count or timeout is zero.
    pub fn new(
        model_host: impl Into<String>,
        model_name: impl Into<String>,
        confidence_threshold: f64,
        max_retries: u32,
        timeout_ms: u64,
    ) -> Result<Self, AutosearchError> {
        let model_host = model_host.into();
        let model_name = model_name.into();

        let host = model_host.trim();
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(AutosearchError::Config(format!(
                "model host `{model_host}` must start with http:// or https://"
            )));
        }
        if model_name.trim().is_empty() {
            return Err(AutosearchError::Config(
                "model name must not be empty".to_string(),
            ));
        }
        if !(confidence_threshold.is_finite() && (0.0..=1.0).contains(&confidence_threshold)) {
            return Err(AutosearchError::Config(format!(
                "confidence threshold must be within [0, 1], got {confidence_threshold}"
            )));
        }
        if max_retries < 1 {
            return Err(AutosearchError::Config(
                "max retries must be at least 1".to_string(),
            ));
        }
        if timeout_ms == 0 {
            return Err(AutosearchError::Config(
                "timeout must be greater than 0 ms".to_string(),
            ));
        }

        Ok(Self {
            model_host: host.trim_end_matches('/').to_string(),
            model_name,
            confidence_threshold,
            max_retries,
            timeout_ms,
        })
    }

    /// Derive a new configuration with the given fields replaced.
    ///
    /// The result is validated exactly like [`SearchConfig::new`]; `self` is untouched.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, AutosearchError> {
        Self::new(
            overrides
                .model_host
                .clone()
                .unwrap_or_else(|| self.model_host.clone()),
            overrides
                .model_name
                .clone()
                .unwrap_or_else(|| self.model_name.clone()),
            overrides
                .confidence_threshold
                .unwrap_or(self.confidence_threshold),
            overrides.max_retries.unwrap_or(self.max_retries),
            overrides.timeout_ms.unwrap_or(self.timeout_ms),
        )
    }

    /// Base URL of the model classifier service, without a trailing slash.
    pub fn model_host(&self) -> &str {
        &self.model_host
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Maximum number of model attempts (always at least 1).
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Per-attempt deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model_host: DEFAULT_MODEL_HOST.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
