// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder every call is a
//! no-op.

use autosearch_core::DecisionMode;
use metrics::{describe_counter, describe_histogram};

/// Register all autosearch metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "autosearch_decisions_total",
        "Search decisions returned, by requested mode and deciding source"
    );
    describe_counter!(
        "autosearch_model_attempts_total",
        "Model classifier attempts, by outcome"
    );
    describe_counter!(
        "autosearch_fallbacks_total",
        "Hybrid decisions that fell back to heuristics after exhausting retries"
    );
    describe_histogram!(
        "autosearch_model_latency_seconds",
        "Model classifier attempt latency in seconds"
    );
}

/// Record a returned decision. `source` is `heuristic`, `model`, or `fallback`.
pub fn record_decision(mode: DecisionMode, source: &'static str) {
    metrics::counter!("autosearch_decisions_total", "mode" => mode.to_string(), "source" => source)
        .increment(1);
}

pub fn record_model_attempt(outcome: &'static str) {
    metrics::counter!("autosearch_model_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_fallback() {
    metrics::counter!("autosearch_fallbacks_total").increment(1);
}

pub fn record_model_latency(seconds: f64) {
    metrics::histogram!("autosearch_model_latency_seconds").record(seconds);
}
