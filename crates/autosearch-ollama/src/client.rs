// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama server.
//!
//! [`OllamaClassifier`] performs one `/api/chat` exchange per call and returns
//! the assistant's raw text. It does not retry: the arbiter owns retry,
//! backoff, and the per-attempt deadline.

use std::time::Duration;

use async_trait::async_trait;
use autosearch_core::{
    AutosearchError, ClassifierRequest, HealthStatus, ModelClassifier, ModelError, SearchConfig,
};
use tracing::debug;

use crate::types::{ChatMessage, ChatOptions, ChatRequest, ChatResponse, ErrorResponse, TagsResponse};

/// Timeout for the `/api/tags` health probe.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Model classifier backed by Ollama's native chat API.
#[derive(Debug, Clone)]
pub struct OllamaClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClassifier {
    /// Creates a classifier for the host and model in `config`.
    pub fn new(config: &SearchConfig) -> Result<Self, AutosearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AutosearchError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.model_host().to_string(),
            model: config.model_name().to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_request(request: ClassifierRequest) -> ChatRequest {
        ChatRequest {
            model: request.model,
            messages: vec![
                ChatMessage::system(request.system_prompt),
                ChatMessage::user(request.user_prompt),
            ],
            stream: false,
            options: ChatOptions {
                temperature: request.temperature,
                num_predict: request.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl ModelClassifier for OllamaClassifier {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn classify(&self, request: ClassifierRequest) -> Result<String, ModelError> {
        let body = Self::chat_request(request);
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Unreachable {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %body.model, "chat response received");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(err) => format!("Ollama returned {status}: {}", err.error),
                Err(_) => format!("Ollama returned {status}: {text}"),
            };
            return Err(ModelError::unreachable(message));
        }

        let text = response.text().await.map_err(|e| ModelError::Unreachable {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let chat: ChatResponse = serde_json::from_str(&text).map_err(|e| ModelError::Parse {
            reason: format!("unexpected chat response: {e}"),
            raw: text.clone(),
        })?;

        Ok(chat.message.content)
    }

    async fn health_check(&self) -> Result<HealthStatus, AutosearchError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(r) => r,
            Err(e) => return Ok(HealthStatus::Unhealthy(format!("{url} unreachable: {e}"))),
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(HealthStatus::Unhealthy(format!("{url} returned {status}")));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| {
            AutosearchError::HealthCheckFailed {
                name: "ollama".to_string(),
                message: format!("invalid /api/tags response: {e}"),
            }
        })?;

        let tagged = format!("{}:latest", self.model);
        if tags
            .models
            .iter()
            .any(|m| m.name == self.model || m.name == tagged)
        {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!(
                "model `{}` is not available on {}",
                self.model, self.base_url
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_classifier(base_url: &str) -> OllamaClassifier {
        let config = SearchConfig::new("http://localhost:11434", "qwen2.5vl:3b", 0.7, 3, 2000).unwrap();
        OllamaClassifier::new(&config)
            .unwrap()
            .with_base_url(base_url)
    }

    fn test_request() -> ClassifierRequest {
        ClassifierRequest {
            system_prompt: "be a classifier".to_string(),
            user_prompt: "classify \"banana bread\"".to_string(),
            model: "qwen2.5vl:3b".to_string(),
            temperature: 0.1,
            max_output_tokens: 256,
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "qwen2.5vl:3b",
            "created_at": "2026-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": content},
            "done": true
        })
    }

    #[test]
    fn new_uses_config_host_and_model() {
        let c = OllamaClassifier::new(&SearchConfig::default()).unwrap();
        assert_eq!(c.base_url(), "http://localhost:11434");
        assert_eq!(c.model(), "qwen2.5vl:3b");
        assert_eq!(c.name(), "ollama");
    }

    #[tokio::test]
    async fn classify_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "qwen2.5vl:3b",
                "stream": false,
                "options": {"num_predict": 256},
                "messages": [
                    {"role": "system", "content": "be a classifier"},
                    {"role": "user", "content": "classify \"banana bread\""}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"shouldSearch\":false}")))
            .expect(1)
            .mount(&server)
            .await;

        let text = test_classifier(&server.uri())
            .classify(test_request())
            .await
            .unwrap();
        assert_eq!(text, "{\"shouldSearch\":false}");
    }

    #[tokio::test]
    async fn server_error_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "model crashed"})),
            )
            .mount(&server)
            .await;

        let err = test_classifier(&server.uri())
            .classify(test_request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "unreachable");
        assert!(err.to_string().contains("model crashed"), "got: {err}");
    }

    #[tokio::test]
    async fn not_found_model_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = test_classifier(&server.uri())
            .classify(test_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn malformed_envelope_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = test_classifier(&server.uri())
            .classify(test_request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        // Nothing listens on port 9 on loopback.
        let err = test_classifier("http://127.0.0.1:9")
            .classify(test_request())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "unreachable");
    }

    #[tokio::test]
    async fn health_check_healthy_when_model_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "llama3:latest"}, {"name": "qwen2.5vl:3b"}]
            })))
            .mount(&server)
            .await;

        let status = test_classifier(&server.uri()).health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_degraded_when_model_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})),
            )
            .mount(&server)
            .await;

        let status = test_classifier(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(ref m) if m.contains("qwen2.5vl:3b")));
    }

    #[tokio::test]
    async fn health_check_unhealthy_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let status = test_classifier(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[tokio::test]
    async fn health_check_unhealthy_when_unreachable() {
        let status = test_classifier("http://127.0.0.1:9").health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let c = test_classifier("http://example.test:8080/");
        assert_eq!(c.base_url(), "http://example.test:8080");
    }
}
