// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted heuristic scoring of a [`QueryAnalysis`].

use autosearch_core::{HeuristicResult, QueryAnalysis};

use crate::patterns::{PatternCatalog, PatternSet};

/// Score every query starts from before any signal is applied.
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// Scores are summed in hundredths so decimal edges such as 0.3 and 0.7 are
/// reached exactly.
const SCALE: i32 = 100;
const NEUTRAL_PRIOR_HUNDREDTHS: i32 = 50;

pub const SIGNAL_TEMPORAL: &str = "temporal";
pub const SIGNAL_CURRENT_EVENT: &str = "current_event";
pub const SIGNAL_REALTIME: &str = "realtime";
pub const SIGNAL_FACTUAL: &str = "factual";
pub const SIGNAL_STATIC_KNOWLEDGE: &str = "static_knowledge";
pub const SIGNAL_OPINION: &str = "opinion";
pub const SIGNAL_CREATIVE: &str = "creative";
pub const SIGNAL_CODE: &str = "code";
pub const SIGNAL_MATH: &str = "math";
pub const SIGNAL_PERSONAL: &str = "personal";
pub const SIGNAL_GREETING_OR_HELP: &str = "greeting_or_help";

/// Signal weights in hundredths, in evaluation order.
pub const WEIGHTS: &[(&str, i32)] = &[
    (SIGNAL_TEMPORAL, 25),
    (SIGNAL_CURRENT_EVENT, 35),
    (SIGNAL_REALTIME, 40),
    (SIGNAL_FACTUAL, 15),
    (SIGNAL_STATIC_KNOWLEDGE, -30),
    (SIGNAL_OPINION, -25),
    (SIGNAL_CREATIVE, -35),
    (SIGNAL_CODE, -30),
    (SIGNAL_MATH, -35),
    (SIGNAL_PERSONAL, -40),
    (SIGNAL_GREETING_OR_HELP, -50),
];

/// Score `analysis` using the built-in catalog.
pub fn score(analysis: &QueryAnalysis) -> HeuristicResult {
    score_with(analysis, PatternCatalog::builtin())
}

/// Score `analysis`, evaluating the static-knowledge and greeting signals
/// against `catalog`.
pub fn score_with(analysis: &QueryAnalysis, catalog: &PatternCatalog) -> HeuristicResult {
    let text = analysis.normalized_query.as_str();

    let signals = WEIGHTS
        .iter()
        .map(|&(name, _)| name)
        .filter(|&name| match name {
            SIGNAL_TEMPORAL => analysis.has_temporal_indicator,
            SIGNAL_CURRENT_EVENT => analysis.has_current_event_indicator,
            SIGNAL_REALTIME => analysis.requires_realtime_data,
            SIGNAL_FACTUAL => analysis.is_factual_question,
            SIGNAL_STATIC_KNOWLEDGE => catalog.matches(PatternSet::StaticKnowledge, text),
            SIGNAL_OPINION => analysis.is_opinion_based,
            SIGNAL_CREATIVE => analysis.is_creative_request,
            SIGNAL_CODE => analysis.is_code_related,
            SIGNAL_MATH => analysis.is_math_related,
            SIGNAL_PERSONAL => analysis.is_personal_question,
            SIGNAL_GREETING_OR_HELP => catalog.matches(PatternSet::NoSearchNeeded, text),
            _ => false,
        })
        .collect();

    combine(signals)
}

/// Score a set of fired signals (names from [`WEIGHTS`]; unknown names
/// contribute nothing).
///
/// The weighted sum is clamped to `[0, 100]` hundredths and divided once, so
/// the result is the closest `f64` to the decimal score.
pub fn combine(signals: Vec<&'static str>) -> HeuristicResult {
    let hundredths: i32 = NEUTRAL_PRIOR_HUNDREDTHS
        + signals
            .iter()
            .filter_map(|name| WEIGHTS.iter().find(|(n, _)| n == name))
            .map(|&(_, weight)| weight)
            .sum::<i32>();

    HeuristicResult {
        score: f64::from(hundredths.clamp(0, SCALE)) / f64::from(SCALE),
        signals,
    }
}
