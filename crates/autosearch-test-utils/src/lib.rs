// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for autosearch integration tests.
//!
//! Provides a scriptable model classifier for fast, deterministic tests
//! without a running model service.
//!
//! # Components
//!
//! - [`MockClassifier`] - Model classifier with queued replies, failures,
//!   delays, and call counting

pub mod mock_classifier;

pub use mock_classifier::{MockClassifier, MockReply};
