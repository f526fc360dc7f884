// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./autosearch.toml` > `~/.config/autosearch/autosearch.toml`
//! > `/etc/autosearch/autosearch.toml`, with environment variable overrides via
//! the `AUTOSEARCH_` prefix and the unprefixed variable names older
//! deployments set.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use crate::model::AutosearchConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/autosearch/autosearch.toml";
/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "autosearch.toml";

/// Unprefixed environment variables and the keys they set.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("ollama_host", "model.host"),
    ("ollama_model", "model.name"),
    ("search_confidence_threshold", "decision.confidence_threshold"),
    ("max_retries", "decision.max_retries"),
    ("request_timeout_ms", "decision.timeout_ms"),
];

/// `~/.config/autosearch/autosearch.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autosearch/autosearch.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/autosearch/autosearch.toml` (system-wide)
/// 3. `~/.config/autosearch/autosearch.toml` (user XDG config)
/// 4. `./autosearch.toml` (local directory)
/// 5. `OLLAMA_HOST`, `OLLAMA_MODEL`, `SEARCH_CONFIDENCE_THRESHOLD`,
///    `MAX_RETRIES`, `REQUEST_TIMEOUT_MS`
/// 6. `AUTOSEARCH_*` environment variables
pub fn load_config() -> Result<AutosearchConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AutosearchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutosearchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AutosearchConfig, figment::Error> {
    debug!(path = %path.display(), "loading config file");
    Figment::new()
        .merge(Serialized::defaults(AutosearchConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AutosearchConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// `AUTOSEARCH_<SECTION>_<KEY>` provider.
///
/// Uses `Env::map()` NOT `Env::split("_")`: key names contain underscores, so
/// `AUTOSEARCH_DECISION_MAX_RETRIES` must map to `decision.max_retries`, not
/// `decision.max.retries`.
fn env_provider() -> Env {
    Env::prefixed("AUTOSEARCH_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        let mapped = ["model", "decision", "service"]
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or(key);
        mapped.into()
    })
}

fn legacy_env_provider() -> Env {
    let names: Vec<&str> = LEGACY_ENV_VARS.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        LEGACY_ENV_VARS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, path)| (*path).to_string())
            .unwrap_or(key)
            .into()
    })
}
