// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama model classifier adapter for the autosearch decision engine.
//!
//! Talks to Ollama's native `/api/chat` endpoint with `stream: false` and
//! returns the assistant message text for the arbiter to validate.

pub mod client;
pub mod types;

pub use client::OllamaClassifier;
