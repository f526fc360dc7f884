// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zero-cost heuristic signals for the autosearch decision engine.
//!
//! This crate provides:
//! - [`PatternCatalog`]: versioned, swappable lexical pattern data
//! - [`analyze`]: raw query into a [`QueryAnalysis`](autosearch_core::QueryAnalysis)
//! - [`score`]: weighted, clamped search-worthiness score with a signal trace
//! - [`infer`]: first-match category inference
//!
//! Everything here is pure and total. No network, no shared mutable state.

pub mod analyzer;
pub mod category;
pub mod patterns;
pub mod scorer;

pub use analyzer::{analyze, analyze_with, normalize};
pub use category::{infer, infer_with};
pub use patterns::{CATALOG_V1, CatalogSource, PatternCatalog, PatternSet, matches_any};
pub use scorer::{NEUTRAL_PRIOR, WEIGHTS, combine, score, score_with};
