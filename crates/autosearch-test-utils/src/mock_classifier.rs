// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model classifier for deterministic testing.
//!
//! `MockClassifier` implements `ModelClassifier` with scripted replies and
//! records every request it receives, so tests can assert both on what the
//! arbiter decided and on how many model calls it made.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use autosearch_core::{AutosearchError, ClassifierRequest, HealthStatus, ModelClassifier, ModelError};

/// Raw reply text used when the queue is empty.
pub const DEFAULT_REPLY: &str = r#"{"shouldSearch":true,"confidence":0.9,"reasoning":"mock classifier","category":"factual_current"}"#;

/// One scripted classifier outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this raw text.
    Text(String),
    /// Fail with `ModelError::Unreachable`.
    Unreachable(String),
    /// Sleep, then return the text. Combine with a short timeout to
    /// simulate a hung model.
    Delayed(Duration, String),
}

/// A mock model classifier that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty the
/// fallback reply is used: [`DEFAULT_REPLY`] unless constructed with
/// [`MockClassifier::always_failing`] or [`MockClassifier::always`].
pub struct MockClassifier {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: MockReply,
    requests: Arc<Mutex<Vec<ClassifierRequest>>>,
    calls: AtomicUsize,
    health: HealthStatus,
}

impl MockClassifier {
    /// Create a mock with an empty reply queue.
    pub fn new() -> Self {
        Self::always(MockReply::Text(DEFAULT_REPLY.to_string()))
    }

    /// Create a mock pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        let mock = Self::new();
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..mock
        }
    }

    /// Create a mock that answers every call with `reply`.
    pub fn always(reply: MockReply) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fallback: reply,
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
            health: HealthStatus::Healthy,
        }
    }

    /// Create a mock whose every call fails as unreachable.
    pub fn always_failing() -> Self {
        Self::always(MockReply::Unreachable("connection refused".to_string()))
    }

    /// Override the status reported by `health_check`.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    /// Add a reply to the end of the queue.
    pub async fn push(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Number of `classify` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received, in arrival order.
    pub async fn requests(&self) -> Vec<ClassifierRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClassifier for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    async fn classify(&self, request: ClassifierRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        match self.next_reply().await {
            MockReply::Text(text) => Ok(text),
            MockReply::Unreachable(message) => Err(ModelError::unreachable(message)),
            MockReply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, AutosearchError> {
        Ok(self.health.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ClassifierRequest {
        ClassifierRequest {
            system_prompt: "system".to_string(),
            user_prompt: "user".to_string(),
            model: "test-model".to_string(),
            temperature: 0.1,
            max_output_tokens: 256,
        }
    }

    #[tokio::test]
    async fn default_reply_when_queue_empty() {
        let mock = MockClassifier::new();
        let text = mock.classify(request()).await.unwrap();
        assert_eq!(text, DEFAULT_REPLY);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn queued_replies_returned_in_order() {
        let mock = MockClassifier::with_replies(vec![
            MockReply::Text("first".to_string()),
            MockReply::Unreachable("down".to_string()),
        ]);
        mock.push(MockReply::Text("third".to_string())).await;

        assert_eq!(mock.classify(request()).await.unwrap(), "first");
        let err = mock.classify(request()).await.unwrap_err();
        assert_eq!(err.kind(), "unreachable");
        assert_eq!(mock.classify(request()).await.unwrap(), "third");
        assert_eq!(mock.classify(request()).await.unwrap(), DEFAULT_REPLY);
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test]
    async fn always_failing_never_succeeds() {
        let mock = MockClassifier::always_failing();
        for _ in 0..3 {
            assert!(mock.classify(request()).await.is_err());
        }
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_reply_waits() {
        let mock = MockClassifier::always(MockReply::Delayed(
            Duration::from_secs(5),
            "late".to_string(),
        ));
        let started = tokio::time::Instant::now();
        assert_eq!(mock.classify(request()).await.unwrap(), "late");
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let mock = MockClassifier::new();
        mock.classify(request()).await.unwrap();
        let seen = mock.requests().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "test-model");
    }

    #[tokio::test]
    async fn health_is_configurable() {
        let mock = MockClassifier::new().with_health(HealthStatus::Unhealthy("down".into()));
        assert_eq!(
            mock.health_check().await.unwrap(),
            HealthStatus::Unhealthy("down".into())
        );
    }
}
