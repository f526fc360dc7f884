// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Adapters use `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod classifier;

pub use classifier::ModelClassifier;
