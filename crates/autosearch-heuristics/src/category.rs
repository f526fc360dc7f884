// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-match category inference.

use autosearch_core::{DecisionCategory, QueryAnalysis};

use crate::patterns::{PatternCatalog, PatternSet};

/// Infer the category of `analysis` using the built-in catalog.
pub fn infer(analysis: &QueryAnalysis) -> DecisionCategory {
    infer_with(analysis, PatternCatalog::builtin())
}

/// Infer the category of `analysis`.
///
/// Priority: code, math, creative, opinion, personal, then factual_current
/// (realtime or current event), then factual_static (static-knowledge match),
/// otherwise ambiguous.
pub fn infer_with(analysis: &QueryAnalysis, catalog: &PatternCatalog) -> DecisionCategory {
    if analysis.is_code_related {
        DecisionCategory::Code
    } else if analysis.is_math_related {
        DecisionCategory::Math
    } else if analysis.is_creative_request {
        DecisionCategory::Creative
    } else if analysis.is_opinion_based {
        DecisionCategory::Opinion
    } else if analysis.is_personal_question {
        DecisionCategory::Personal
    } else if analysis.requires_realtime_data || analysis.has_current_event_indicator {
        DecisionCategory::FactualCurrent
    } else if catalog.matches(PatternSet::StaticKnowledge, &analysis.normalized_query) {
        DecisionCategory::FactualStatic
    } else {
        DecisionCategory::Ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    fn category(q: &str) -> DecisionCategory {
        infer(&analyze(q))
    }

    #[test]
    fn each_category_is_reachable() {
        assert_eq!(category("refactor this class"), DecisionCategory::Code);
        assert_eq!(category("simplify 3 * 4"), DecisionCategory::Math);
        assert_eq!(category("compose a poem"), DecisionCategory::Creative);
        assert_eq!(category("best pizza topping"), DecisionCategory::Opinion);
        assert_eq!(category("are you sentient"), DecisionCategory::Personal);
        assert_eq!(category("latest news"), DecisionCategory::FactualCurrent);
        assert_eq!(category("capital of peru"), DecisionCategory::FactualStatic);
        assert_eq!(category("banana bread"), DecisionCategory::Ambiguous);
    }

    #[test]
    fn code_outranks_everything() {
        // creative ("write") + code ("python") + current event ("news")
        assert_eq!(category("write python to scrape news"), DecisionCategory::Code);
    }

    #[test]
    fn math_outranks_creative() {
        assert_eq!(category("create an algebra quiz"), DecisionCategory::Math);
    }

    #[test]
    fn personal_outranks_factual_current() {
        assert_eq!(category("do you know the weather"), DecisionCategory::Personal);
    }

    #[test]
    fn current_outranks_static() {
        assert_eq!(category("what is the weather today"), DecisionCategory::FactualCurrent);
    }

    #[test]
    fn empty_query_is_ambiguous() {
        assert_eq!(category(""), DecisionCategory::Ambiguous);
    }
}
