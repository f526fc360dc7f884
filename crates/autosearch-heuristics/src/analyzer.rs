// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query analysis: raw text into an immutable set of boolean signals.
//!
//! Analysis never fails. Empty, punctuation-only, and non-ASCII input all
//! produce a valid [`QueryAnalysis`] with the corresponding signals unset.

use std::sync::LazyLock;

use autosearch_core::QueryAnalysis;
use regex::Regex;

use crate::patterns::{PatternCatalog, PatternSet};

/// Leading interrogative words that mark a factual question.
static INTERROGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(what|who|when|where|why|how|which|is|are|was|were|do|does|did|can|could|will|would)\b",
    )
    .unwrap()
});

/// Analyze `query` against the built-in catalog.
pub fn analyze(query: &str) -> QueryAnalysis {
    analyze_with(query, PatternCatalog::builtin())
}

/// Analyze `query` against an explicit catalog.
pub fn analyze_with(query: &str, catalog: &PatternCatalog) -> QueryAnalysis {
    let normalized = normalize(query);
    let tokens: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();

    let has_temporal_indicator = catalog.contains_temporal(&normalized);
    let has_current_event_indicator = catalog.matches(PatternSet::CurrentEvent, &normalized);
    let is_factual_question = normalized.contains('?') || INTERROGATIVE.is_match(&normalized);

    // Current-event evidence wins outright; temporal + factual only counts
    // when the query is not also a static-knowledge request.
    let requires_realtime_data = has_current_event_indicator
        || (has_temporal_indicator
            && is_factual_question
            && !catalog.matches(PatternSet::StaticKnowledge, &normalized));

    QueryAnalysis {
        query: query.to_string(),
        tokens,
        has_temporal_indicator,
        has_current_event_indicator,
        is_factual_question,
        is_opinion_based: catalog.matches(PatternSet::Opinion, &normalized),
        is_creative_request: catalog.matches(PatternSet::Creative, &normalized),
        is_code_related: catalog.matches(PatternSet::Code, &normalized),
        is_math_related: catalog.matches(PatternSet::Math, &normalized),
        is_personal_question: catalog.matches(PatternSet::Personal, &normalized),
        requires_realtime_data,
        normalized_query: normalized,
    }
}

/// Lowercase, trim, and collapse internal whitespace runs to a single space.
pub fn normalize(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
