// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command returns a serializable report; `main` prints it as JSON.

use std::sync::Arc;

use autosearch_arbiter::DecisionArbiter;
use autosearch_config::AutosearchConfig;
use autosearch_core::{
    AutosearchError, DecisionCategory, DecisionMode, HealthStatus, QueryAnalysis, SearchDecision,
};
use autosearch_ollama::OllamaClassifier;
use serde::Serialize;
use tracing::info;

/// One entry of `batch` output.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub query: String,
    pub decision: SearchDecision,
}

/// Output of `analyze`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    pub analysis: QueryAnalysis,
    pub heuristic_score: f64,
    pub signals: Vec<&'static str>,
    pub category: DecisionCategory,
}

/// Output of `health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub classifier: String,
    pub endpoint: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Build the arbiter described by `config`, wired to the Ollama classifier.
pub fn build_arbiter(config: &AutosearchConfig) -> Result<DecisionArbiter, AutosearchError> {
    let search = config.search_config()?;
    let classifier = OllamaClassifier::new(&search)?;

    info!(
        host = search.model_host(),
        model = search.model_name(),
        threshold = search.confidence_threshold(),
        max_retries = search.max_retries(),
        timeout_ms = search.timeout_ms(),
        mode = %config.decision.mode,
        "decision arbiter configured"
    );

    Ok(DecisionArbiter::new(search)
        .with_classifier(Arc::new(classifier))
        .with_default_mode(config.decision.mode)
        .with_generation(config.model.temperature, config.model.max_output_tokens))
}

pub async fn decide(
    arbiter: &DecisionArbiter,
    query: &str,
    mode: Option<DecisionMode>,
) -> SearchDecision {
    let mode = mode.unwrap_or(arbiter.default_mode());
    arbiter.decide(query, mode).await
}

pub async fn batch(
    arbiter: &DecisionArbiter,
    queries: &[String],
    mode: Option<DecisionMode>,
) -> Vec<BatchEntry> {
    let mode = mode.unwrap_or(arbiter.default_mode());
    let decisions = arbiter.decide_batch(queries, mode).await;
    queries
        .iter()
        .cloned()
        .zip(decisions)
        .map(|(query, decision)| BatchEntry { query, decision })
        .collect()
}

pub fn analyze(arbiter: &DecisionArbiter, query: &str) -> AnalyzeReport {
    let analysis = arbiter.analyze(query);
    let result = arbiter.heuristic_score(query);
    AnalyzeReport {
        category: arbiter.category(query),
        heuristic_score: result.score,
        signals: result.signals,
        analysis,
    }
}

pub async fn health(arbiter: &DecisionArbiter) -> Result<HealthReport, AutosearchError> {
    let endpoint = arbiter.config().model_host().to_string();
    let Some(classifier) = arbiter.classifier() else {
        return Ok(HealthReport {
            classifier: "none".to_string(),
            endpoint,
            status: "unhealthy",
            detail: Some("no model classifier configured".to_string()),
        });
    };

    let (status, detail) = match classifier.health_check().await? {
        HealthStatus::Healthy => ("healthy", None),
        HealthStatus::Degraded(reason) => ("degraded", Some(reason)),
        HealthStatus::Unhealthy(reason) => ("unhealthy", Some(reason)),
    };

    Ok(HealthReport {
        classifier: classifier.name().to_string(),
        endpoint,
        status,
        detail,
    })
}
