// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model classifier adapter trait for external LLM-backed classifiers.

use async_trait::async_trait;

use crate::error::{AutosearchError, ModelError};
use crate::types::{ClassifierRequest, HealthStatus};

/// Adapter for an external model that classifies queries.
///
/// Implementations perform exactly one request/response exchange per call and
/// return the raw response text. They make no promise that the text is valid
/// JSON; the arbiter validates it. Deadlines are enforced by the caller, so
/// implementations must be cancel-safe when their future is dropped.
#[async_trait]
pub trait ModelClassifier: Send + Sync + 'static {
    /// Returns the human-readable name of this classifier.
    fn name(&self) -> &str;

    /// Sends one classification request and returns the raw response text.
    async fn classify(&self, request: ClassifierRequest) -> Result<String, ModelError>;

    /// Checks that the classifier service is reachable and ready.
    async fn health_check(&self) -> Result<HealthStatus, AutosearchError>;
}
