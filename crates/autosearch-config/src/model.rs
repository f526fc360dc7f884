// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for autosearch.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use autosearch_core::config::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_RETRIES, DEFAULT_MODEL_HOST, DEFAULT_MODEL_NAME,
    DEFAULT_TIMEOUT_MS,
};
use autosearch_core::{AutosearchError, DecisionMode, SearchConfig};
use serde::{Deserialize, Serialize};

/// Top-level autosearch configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutosearchConfig {
    /// Model classifier endpoint and sampling settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Decision thresholds, retry budget, and default mode.
    #[serde(default)]
    pub decision: DecisionConfig,

    /// Process-level settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

impl AutosearchConfig {
    /// Build the immutable decision configuration from this file-level config.
    pub fn search_config(&self) -> Result<SearchConfig, AutosearchError> {
        SearchConfig::new(
            self.model.host.clone(),
            self.model.name.clone(),
            self.decision.confidence_threshold,
            self.decision.max_retries,
            self.decision.timeout_ms,
        )
    }
}

/// Model classifier configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_model_host")]
    pub host: String,

    /// Model used for classification.
    #[serde(default = "default_model_name")]
    pub name: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap for a classification reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            host: default_model_host(),
            name: default_model_name(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_model_host() -> String {
    DEFAULT_MODEL_HOST.to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    256
}

/// Decision configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionConfig {
    /// Heuristic score at or above which a search is recommended. Also
    /// bounds the confident band `[0, 1 - t] ∪ [t, 1]`.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Model attempts per decision, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-attempt deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Mode used when a caller does not choose one.
    #[serde(default)]
    pub mode: DecisionMode,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_retries: default_max_retries(),
            timeout_ms: default_timeout_ms(),
            mode: DecisionMode::default(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Process-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
