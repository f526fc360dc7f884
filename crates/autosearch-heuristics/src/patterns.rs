// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Versioned pattern catalog of lexical signals per semantic category.
//!
//! The catalog is plain data: a [`CatalogSource`] lists the raw patterns and a
//! [`PatternCatalog`] holds their compiled, case-insensitive form. The scoring
//! algorithm only ever asks "does any pattern of set X match?", so a catalog
//! can be replaced without touching the scorer.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Named pattern lists in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSet {
    CurrentEvent,
    StaticKnowledge,
    Opinion,
    Creative,
    Code,
    Math,
    Personal,
    NoSearchNeeded,
}

/// Uncompiled catalog data.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSource {
    pub version: u32,
    /// Literal phrases matched by substring containment, not regex.
    pub temporal: &'static [&'static str],
    pub current_event: &'static [&'static str],
    pub static_knowledge: &'static [&'static str],
    pub opinion: &'static [&'static str],
    pub creative: &'static [&'static str],
    pub code: &'static [&'static str],
    pub math: &'static [&'static str],
    pub personal: &'static [&'static str],
    pub no_search_needed: &'static [&'static str],
}

/// The built-in catalog.
pub const CATALOG_V1: CatalogSource = CatalogSource {
    version: 1,
    temporal: &[
        "today",
        "yesterday",
        "tomorrow",
        "now",
        "current",
        "currently",
        "latest",
        "recent",
        "recently",
        "this week",
        "this month",
        "this year",
        "right now",
        "at the moment",
        "presently",
        "nowadays",
        "these days",
        "2024",
        "2025",
        "2026",
    ],
    current_event: &[
        r"\b(news|headlines|happening|update|updates|breaking)\b",
        r"\b(stock|stocks|price|prices|market|markets)\b",
        r"\b(weather|forecast|temperature)\b",
        r"\b(score|scores|game|match|playing)\b",
        r"\b(election|vote|voting|poll|polls)\b",
        r"\bwho (is|are|was|were) (the )?(current|new|latest)\b",
        r"\bwhat (is|are) .* (doing|happening|going on)\b",
    ],
    static_knowledge: &[
        r"\b(what is|define|definition|explain|meaning of)\b",
        r"\b(how does|how do|how to)\b.*\b(work|function|operate)\b",
        r"\b(history of|origin of|invented|discovered)\b",
        r"\b(capital of|population of|located in)\b",
        r"\bwho (invented|discovered|created|founded|wrote)\b",
        r"\b(formula|equation|theorem|law|principle)\b",
    ],
    opinion: &[
        r"\b(should i|do you think|what do you think|opinion|recommend|suggestion)\b",
        r"\b(best|worst|favorite|better|worse)\b",
        r"\b(prefer|preference|advice)\b",
    ],
    creative: &[
        r"\b(write|create|generate|make|compose|draft)\b",
        r"\b(story|poem|essay|article|script|song|lyrics)\b",
        r"\b(imagine|pretend|roleplay|act as)\b",
    ],
    code: &[
        r"\b(code|coding|program|programming|function|class|method)\b",
        r"\b(javascript|typescript|python|java|rust|golang|c\+\+|ruby)\b",
        r"\b(debug|error|bug|fix|implement|refactor)\b",
        r"\b(api|database|server|client|frontend|backend)\b",
        r"```[\s\S]*```",
    ],
    math: &[
        r"\b(calculate|compute|solve|equation|formula)\b",
        r"\b(math|mathematics|algebra|calculus|geometry|statistics)\b",
        r"\d+\s*[-+*/^]\s*\d+",
        r"\b(sum|product|derivative|integral|factor|simplify)\b",
    ],
    personal: &[
        r"\b(you|your|yourself)\b",
        r"\b(are you|can you|do you|will you)\b",
        r"\bwho are you\b",
    ],
    no_search_needed: &[
        r"^(hi|hello|hey|good morning|good afternoon|good evening|thanks|thank you)",
        r"\b(help me understand|explain to me|teach me)\b",
        r"^what can you do",
    ],
};

/// Compiled pattern catalog.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    version: u32,
    temporal: Vec<&'static str>,
    current_event: Vec<Regex>,
    static_knowledge: Vec<Regex>,
    opinion: Vec<Regex>,
    creative: Vec<Regex>,
    code: Vec<Regex>,
    math: Vec<Regex>,
    personal: Vec<Regex>,
    no_search_needed: Vec<Regex>,
}

static BUILTIN: LazyLock<PatternCatalog> =
    LazyLock::new(|| PatternCatalog::compile(&CATALOG_V1).unwrap());

impl PatternCatalog {
    /// Compile a catalog source. Every regex is case-insensitive.
    pub fn compile(source: &CatalogSource) -> Result<Self, regex::Error> {
        Ok(Self {
            version: source.version,
            temporal: source.temporal.to_vec(),
            current_event: compile_list(source.current_event)?,
            static_knowledge: compile_list(source.static_knowledge)?,
            opinion: compile_list(source.opinion)?,
            creative: compile_list(source.creative)?,
            code: compile_list(source.code)?,
            math: compile_list(source.math)?,
            personal: compile_list(source.personal)?,
            no_search_needed: compile_list(source.no_search_needed)?,
        })
    }

    /// The shared, compiled built-in catalog.
    pub fn builtin() -> &'static PatternCatalog {
        &BUILTIN
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The compiled patterns of one set, in catalog order.
    pub fn patterns(&self, set: PatternSet) -> &[Regex] {
        match set {
            PatternSet::CurrentEvent => &self.current_event,
            PatternSet::StaticKnowledge => &self.static_knowledge,
            PatternSet::Opinion => &self.opinion,
            PatternSet::Creative => &self.creative,
            PatternSet::Code => &self.code,
            PatternSet::Math => &self.math,
            PatternSet::Personal => &self.personal,
            PatternSet::NoSearchNeeded => &self.no_search_needed,
        }
    }

    /// True iff any pattern of `set` matches anywhere in `text`.
    pub fn matches(&self, set: PatternSet, text: &str) -> bool {
        matches_any(text, self.patterns(set))
    }

    /// True iff `text` contains any temporal marker (case-insensitive substring).
    pub fn contains_temporal(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.temporal.iter().any(|marker| lower.contains(marker))
    }
}

/// True iff any entry of `patterns` matches anywhere in `text`.
pub fn matches_any(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

fn compile_list(sources: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    sources
        .iter()
        .map(|s| RegexBuilder::new(s).case_insensitive(true).build())
        .collect()
}
