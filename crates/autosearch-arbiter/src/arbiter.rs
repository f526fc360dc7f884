// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision arbiter: heuristic-only and hybrid search decisions.
//!
//! Orchestrates: analyze > score > (confident band ? heuristics : model with
//! retry) > fallback to heuristics. Every public decision call is total.

use std::sync::Arc;

use autosearch_core::{
    DecisionCategory, DecisionMode, HeuristicResult, ModelClassifier, QueryAnalysis,
    SearchConfig, SearchDecision,
};
use autosearch_heuristics::{NEUTRAL_PRIOR, PatternCatalog, analyze_with, infer_with, score_with};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::parse::parse_decision;
use crate::prompts::{self, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::recording;
use crate::retry::{RetryOutcome, RetryPolicy, run_with_retry};

/// Heuristic evaluation of one query, before normalization to a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicVerdict {
    pub result: HeuristicResult,
    pub category: DecisionCategory,
    pub should_search: bool,
}

/// Where a decision came from. Callers only ever see the normalized
/// [`SearchDecision`].
#[derive(Debug, Clone, PartialEq)]
enum Verdict {
    Heuristic(HeuristicVerdict),
    Model(SearchDecision),
}

impl Verdict {
    fn into_decision(self) -> SearchDecision {
        match self {
            Verdict::Heuristic(h) => SearchDecision {
                should_search: h.should_search,
                confidence: ((h.result.score - NEUTRAL_PRIOR).abs() * 2.0).clamp(0.0, 1.0),
                reasoning: if h.result.signals.is_empty() {
                    "none".to_string()
                } else {
                    h.result.signals.join(", ")
                },
                category: h.category,
            },
            Verdict::Model(decision) => decision,
        }
    }
}

/// Absorbs the rounding in `1.0 - threshold` so band edges are inclusive.
const EDGE_TOLERANCE: f64 = 1e-9;

/// True when `score` is decisive enough to skip the model classifier.
pub fn in_confident_band(score: f64, threshold: f64) -> bool {
    score <= 1.0 - threshold + EDGE_TOLERANCE || reaches(score, threshold)
}

fn reaches(score: f64, threshold: f64) -> bool {
    score >= threshold - EDGE_TOLERANCE
}

/// Heuristic-only decision for `query` under `config`, using the built-in catalog.
pub fn decide_heuristic(config: &SearchConfig, query: &str) -> SearchDecision {
    Verdict::Heuristic(evaluate(config, PatternCatalog::builtin(), query)).into_decision()
}

fn evaluate(config: &SearchConfig, catalog: &PatternCatalog, query: &str) -> HeuristicVerdict {
    let analysis = analyze_with(query, catalog);
    let result = score_with(&analysis, catalog);
    let category = infer_with(&analysis, catalog);
    HeuristicVerdict {
        should_search: reaches(result.score, config.confidence_threshold()),
        result,
        category,
    }
}

/// Produces search decisions from heuristics and, in hybrid mode, an
/// external model classifier.
///
/// The arbiter holds no mutable state; `decide` may be called concurrently
/// from any number of tasks.
#[derive(Clone)]
pub struct DecisionArbiter {
    config: SearchConfig,
    catalog: Arc<PatternCatalog>,
    classifier: Option<Arc<dyn ModelClassifier>>,
    default_mode: DecisionMode,
    temperature: f32,
    max_output_tokens: u32,
}

impl DecisionArbiter {
    /// Create an arbiter with no model classifier. Hybrid requests are
    /// served by heuristics until one is attached.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            catalog: Arc::new(PatternCatalog::builtin().clone()),
            classifier: None,
            default_mode: DecisionMode::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Attach the model classifier consulted for ambiguous scores.
    pub fn with_classifier(mut self, classifier: Arc<dyn ModelClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Mode used by [`decide_default`](Self::decide_default).
    pub fn with_default_mode(mut self, mode: DecisionMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Sampling settings sent with every model request.
    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Replace the pattern catalog.
    pub fn with_catalog(mut self, catalog: PatternCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn default_mode(&self) -> DecisionMode {
        self.default_mode
    }

    pub fn classifier(&self) -> Option<&Arc<dyn ModelClassifier>> {
        self.classifier.as_ref()
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        analyze_with(query, &self.catalog)
    }

    pub fn heuristic_score(&self, query: &str) -> HeuristicResult {
        score_with(&self.analyze(query), &self.catalog)
    }

    pub fn category(&self, query: &str) -> DecisionCategory {
        infer_with(&self.analyze(query), &self.catalog)
    }

    /// Score, category, and search flag for `query` without consulting the model.
    pub fn heuristic_verdict(&self, query: &str) -> HeuristicVerdict {
        evaluate(&self.config, &self.catalog, query)
    }

    /// Decide whether `query` needs a web search.
    ///
    /// Never fails. In hybrid mode, model timeouts, transport failures, and
    /// unparseable replies are retried and then absorbed by falling back to
    /// the heuristic decision for the same query.
    pub async fn decide(&self, query: &str, mode: DecisionMode) -> SearchDecision {
        let heuristic = self.heuristic_verdict(query);
        let threshold = self.config.confidence_threshold();
        let score = heuristic.result.score;

        let (verdict, source) = match (mode, &self.classifier) {
            (DecisionMode::HeuristicOnly, _) => (Verdict::Heuristic(heuristic), "heuristic"),
            (DecisionMode::Hybrid, None) => {
                debug!(score, "no model classifier configured, using heuristics");
                (Verdict::Heuristic(heuristic), "heuristic")
            }
            (DecisionMode::Hybrid, Some(_)) if in_confident_band(score, threshold) => {
                debug!(score, threshold, "heuristic score in confident band");
                (Verdict::Heuristic(heuristic), "heuristic")
            }
            (DecisionMode::Hybrid, Some(classifier)) => {
                debug!(score, threshold, classifier = classifier.name(), "ambiguous score, consulting model");
                match self.consult_model(classifier, query).await {
                    RetryOutcome::Succeeded { value, attempts } => {
                        info!(
                            attempts,
                            should_search = value.should_search,
                            category = %value.category,
                            "model decision accepted"
                        );
                        (Verdict::Model(value), "model")
                    }
                    RetryOutcome::Exhausted {
                        attempts,
                        last_error,
                    } => {
                        warn!(
                            attempts,
                            error = %last_error,
                            "model classifier unavailable, falling back to heuristics"
                        );
                        recording::record_fallback();
                        (Verdict::Heuristic(heuristic), "fallback")
                    }
                }
            }
        };

        recording::record_decision(mode, source);
        verdict.into_decision()
    }

    /// Decide using the configured default mode.
    pub async fn decide_default(&self, query: &str) -> SearchDecision {
        self.decide(query, self.default_mode).await
    }

    /// Decide every query independently. Output order matches input order.
    pub async fn decide_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        mode: DecisionMode,
    ) -> Vec<SearchDecision> {
        join_all(queries.iter().map(|q| self.decide(q.as_ref(), mode))).await
    }

    /// One-shot helper returning only the search flag.
    pub async fn should_search(&self, query: &str, mode: DecisionMode) -> bool {
        self.decide(query, mode).await.should_search
    }

    async fn consult_model(
        &self,
        classifier: &Arc<dyn ModelClassifier>,
        query: &str,
    ) -> RetryOutcome<SearchDecision> {
        let request = prompts::build_request(
            query,
            &self.config,
            self.temperature,
            self.max_output_tokens,
        );
        let policy = RetryPolicy::from_config(&self.config);

        run_with_retry(&policy, |attempt| {
            let classifier = Arc::clone(classifier);
            let request = request.clone();
            async move {
                debug!(attempt, "sending classification request");
                let raw = classifier.classify(request).await?;
                parse_decision(&raw)
            }
        })
        .await
    }
}

impl std::fmt::Debug for DecisionArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionArbiter")
            .field("config", &self.config)
            .field("catalog_version", &self.catalog.version())
            .field("classifier", &self.classifier.as_ref().map(|c| c.name().to_string()))
            .field("default_mode", &self.default_mode)
            .finish()
    }
}
