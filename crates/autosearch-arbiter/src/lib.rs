// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search decision arbitration for the autosearch engine.
//!
//! This crate provides:
//! - [`DecisionArbiter`]: heuristic-only and hybrid decisions, batch
//!   decisioning, and the analyze/score/category facade
//! - [`run_with_retry`]: the sequential retry state machine with per-attempt
//!   timeout and exponential backoff
//! - [`parse_decision`]: extraction and validation of model JSON verdicts
//!
//! Hybrid decisions only reach the model classifier when the heuristic score
//! falls between `1 - threshold` and `threshold`. Model failures never escape:
//! after the last attempt the heuristic decision is returned instead.

pub mod arbiter;
pub mod parse;
pub mod prompts;
pub mod recording;
pub mod retry;

pub use arbiter::{DecisionArbiter, HeuristicVerdict, decide_heuristic, in_confident_band};
pub use parse::{extract_json_object, parse_decision};
pub use recording::register_metrics;
pub use retry::{RetryOutcome, RetryPolicy, run_with_retry};
