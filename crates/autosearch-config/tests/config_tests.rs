// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the autosearch configuration system.

use autosearch_config::diagnostic::ConfigError;
use autosearch_config::{load_and_validate_str, load_config_from_str};
use autosearch_core::{DecisionMode, SearchConfig};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[model]
host = "http://ollama.internal:11434"
name = "llama3.2:3b"
temperature = 0.2
max_output_tokens = 128

[decision]
confidence_threshold = 0.8
max_retries = 2
timeout_ms = 5000
mode = "heuristic"

[service]
log_level = "debug"
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.model.host, "http://ollama.internal:11434");
    assert_eq!(config.model.name, "llama3.2:3b");
    assert_eq!(config.model.temperature, 0.2);
    assert_eq!(config.model.max_output_tokens, 128);
    assert_eq!(config.decision.confidence_threshold, 0.8);
    assert_eq!(config.decision.max_retries, 2);
    assert_eq!(config.decision.timeout_ms, 5000);
    assert_eq!(config.decision.mode, DecisionMode::HeuristicOnly);
    assert_eq!(config.service.log_level, "debug");

    let search = config.search_config().unwrap();
    assert_eq!(search.model_host(), "http://ollama.internal:11434");
    assert_eq!(search.confidence_threshold(), 0.8);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").unwrap();
    assert_eq!(config.search_config().unwrap(), SearchConfig::default());
    assert_eq!(config.decision.mode, DecisionMode::Hybrid);
}

#[test]
fn heuristic_only_alias_is_accepted() {
    let config = load_and_validate_str("[decision]\nmode = \"heuristic-only\"\n").unwrap();
    assert_eq!(config.decision.mode, DecisionMode::HeuristicOnly);
}

#[test]
fn unknown_key_gets_suggestion() {
    let toml = "[decision]\nconfidence_treshold = 0.9\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "confidence_treshold");
            assert_eq!(suggestion.as_deref(), Some("confidence_threshold"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[search]\nenabled = true\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { ref key, .. } if key == "search"));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[decision]\nmax_retries = \"three\"\n").unwrap_err();
    assert!(
        matches!(errors[0], ConfigError::InvalidType { ref key, .. } if key.contains("max_retries")),
        "got {:?}",
        errors[0]
    );
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(load_config_from_str("[decision]\nmode = \"model-only\"\n").is_err());
}

#[test]
fn semantic_errors_are_all_collected() {
    let toml = r#"
[model]
host = "ftp://nope"

[decision]
confidence_threshold = 1.5
max_retries = 0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn diagnostics_render_with_help() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let errors = load_and_validate_str("[model]\nnmae = \"x\"\n").unwrap_err();
    let diagnostic: &dyn Diagnostic = &errors[0];
    let help = diagnostic.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("did you mean `name`"), "help: {help}");

    let mut out = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut out, diagnostic)
        .unwrap();
    assert!(out.contains("nmae"));
}
