// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the autosearch decision engine.
//!
//! This crate provides the data model (`QueryAnalysis`, `HeuristicResult`,
//! `SearchDecision`), the validated `SearchConfig`, error types, and the
//! `ModelClassifier` adapter trait used by the hybrid arbiter.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use config::{ConfigOverrides, SearchConfig};
pub use error::{AutosearchError, ModelError};
pub use types::{
    ClassifierRequest, DecisionCategory, DecisionMode, HealthStatus, HeuristicResult,
    QueryAnalysis, SearchDecision,
};

pub use traits::ModelClassifier;
