// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the analyzer, scorer, arbiter, and adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Immutable signal set derived once from a raw query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAnalysis {
    /// The query exactly as received.
    pub query: String,
    /// Lowercased, trimmed, whitespace-collapsed text.
    pub normalized_query: String,
    /// Whitespace-separated tokens of the normalized text.
    pub tokens: Vec<String>,
    pub has_temporal_indicator: bool,
    pub has_current_event_indicator: bool,
    pub is_factual_question: bool,
    pub is_opinion_based: bool,
    pub is_creative_request: bool,
    pub is_code_related: bool,
    pub is_math_related: bool,
    pub is_personal_question: bool,
    pub requires_realtime_data: bool,
}

/// Bounded heuristic score plus the names of the signals that fired, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicResult {
    /// Search-worthiness in `[0, 1]`.
    pub score: f64,
    /// Fired signal names in evaluation order.
    pub signals: Vec<&'static str>,
}

/// Best-fit label describing the nature of a query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionCategory {
    FactualCurrent,
    FactualStatic,
    Opinion,
    Creative,
    Code,
    Math,
    Personal,
    Ambiguous,
}

/// Final answer to "does this query need a web search?".
///
/// The shape is the same whether the heuristics or the model classifier
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDecision {
    pub should_search: bool,
    /// Certainty of the decision in `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
    pub category: DecisionCategory,
}

/// How a decision should be reached.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum DecisionMode {
    /// Signals only; never consults the model classifier.
    #[serde(rename = "heuristic", alias = "heuristic-only")]
    #[strum(to_string = "heuristic", serialize = "heuristic-only")]
    HeuristicOnly,
    /// Signals first, model classifier for scores in the ambiguous band.
    #[default]
    #[serde(rename = "hybrid")]
    #[strum(to_string = "hybrid")]
    Hybrid,
}

/// A single request to an external model classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Health status reported by classifier health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Classifier is fully operational.
    Healthy,
    /// Classifier responds but is not ready (e.g. model not pulled).
    Degraded(String),
    /// Classifier is not reachable.
    Unhealthy(String),
}
