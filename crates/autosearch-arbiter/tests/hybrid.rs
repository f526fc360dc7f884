// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid decisions against a scripted model classifier.

use std::sync::Arc;
use std::time::Duration;

use autosearch_arbiter::{DecisionArbiter, decide_heuristic, in_confident_band};
use autosearch_core::{DecisionCategory, DecisionMode, SearchConfig};
use autosearch_test_utils::{MockClassifier, MockReply};

const AMBIGUOUS: &str = "banana bread";
const MODEL_SAYS_NO: &str = r#"{"shouldSearch":false,"confidence":0.75,"reasoning":"recipe from training data","category":"creative"}"#;

fn config(max_retries: u32, timeout_ms: u64) -> SearchConfig {
    SearchConfig::new("http://localhost:11434", "test-model", 0.7, max_retries, timeout_ms).unwrap()
}

fn hybrid(config: SearchConfig, mock: &Arc<MockClassifier>) -> DecisionArbiter {
    DecisionArbiter::new(config).with_classifier(mock.clone())
}

#[tokio::test]
async fn confident_scores_never_call_the_model() {
    let mock = Arc::new(MockClassifier::new());
    let arbiter = hybrid(config(3, 1000), &mock);

    let queries = [
        "what is the weather today",
        "write a python function",
        "hello how are you",
        "current news",
        "solve 2 + 2",
        "latest election results",
    ];
    for q in queries {
        let score = arbiter.heuristic_score(q).score;
        assert!(in_confident_band(score, 0.7), "{q} scored {score}");
        let d = arbiter.decide(q, DecisionMode::Hybrid).await;
        assert_eq!(d, decide_heuristic(arbiter.config(), q), "{q}");
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn ambiguous_score_uses_model_verdict() {
    let mock = Arc::new(MockClassifier::with_replies(vec![MockReply::Text(
        MODEL_SAYS_NO.to_string(),
    )]));
    let arbiter = hybrid(config(3, 1000), &mock);

    let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
    assert!(!d.should_search);
    assert_eq!(d.confidence, 0.75);
    assert_eq!(d.reasoning, "recipe from training data");
    assert_eq!(d.category, DecisionCategory::Creative);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn model_request_carries_prompts_and_settings() {
    let mock = Arc::new(MockClassifier::new());
    let arbiter = hybrid(config(1, 1000), &mock).with_generation(0.3, 64);

    arbiter.decide("who invented the telephone", DecisionMode::Hybrid).await;
    let requests = mock.requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.model, "test-model");
    assert_eq!(req.temperature, 0.3);
    assert_eq!(req.max_output_tokens, 64);
    assert!(req.user_prompt.contains("\"who invented the telephone\""));
    assert!(req.system_prompt.contains("shouldSearch"));
}

#[tokio::test]
async fn heuristic_only_mode_ignores_classifier() {
    let mock = Arc::new(MockClassifier::new());
    let arbiter = hybrid(config(3, 1000), &mock);

    let d = arbiter.decide(AMBIGUOUS, DecisionMode::HeuristicOnly).await;
    assert_eq!(d, decide_heuristic(arbiter.config(), AMBIGUOUS));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn total_model_failure_falls_back_to_heuristics() {
    for retries in [1, 3, 5] {
        let mock = Arc::new(MockClassifier::always_failing());
        let arbiter = hybrid(config(retries, 1000), &mock);

        let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
        assert_eq!(d, decide_heuristic(arbiter.config(), AMBIGUOUS));
        assert_eq!(mock.call_count(), retries as usize);
    }
}

#[tokio::test(start_paused = true)]
async fn unparseable_replies_are_retried() {
    let mock = Arc::new(MockClassifier::with_replies(vec![
        MockReply::Text("I'm not sure".to_string()),
        MockReply::Text(r#"{"shouldSearch":maybe}"#.to_string()),
        MockReply::Text(format!("Answer: {MODEL_SAYS_NO}")),
    ]));
    let arbiter = hybrid(config(3, 1000), &mock);

    let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
    assert_eq!(d.category, DecisionCategory::Creative);
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn persistent_garbage_falls_back() {
    let mock = Arc::new(MockClassifier::always(MockReply::Text("no json here".to_string())));
    let arbiter = hybrid(config(2, 1000), &mock);

    let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
    assert_eq!(d, decide_heuristic(arbiter.config(), AMBIGUOUS));
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn hung_model_times_out_then_falls_back() {
    let mock = Arc::new(MockClassifier::always(MockReply::Delayed(
        Duration::from_secs(3600),
        MODEL_SAYS_NO.to_string(),
    )));
    let arbiter = hybrid(config(2, 50), &mock);

    let started = tokio::time::Instant::now();
    let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
    assert_eq!(d, decide_heuristic(arbiter.config(), AMBIGUOUS));
    assert_eq!(mock.call_count(), 2);
    // two 50ms deadlines and one 100ms backoff, nowhere near the hour-long reply
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn slow_first_attempt_recovers_on_retry() {
    let mock = Arc::new(MockClassifier::with_replies(vec![
        MockReply::Delayed(Duration::from_secs(10), MODEL_SAYS_NO.to_string()),
        MockReply::Text(MODEL_SAYS_NO.to_string()),
    ]));
    let arbiter = hybrid(config(3, 100), &mock);

    let d = arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await;
    assert_eq!(d.reasoning, "recipe from training data");
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn batch_mixes_confident_and_ambiguous_queries() {
    let mock = Arc::new(MockClassifier::new());
    let arbiter = hybrid(config(3, 1000), &mock);

    let decisions = arbiter
        .decide_batch(
            &["current news", AMBIGUOUS, "write code", "hello"],
            DecisionMode::Hybrid,
        )
        .await;
    let flags: Vec<bool> = decisions.iter().map(|d| d.should_search).collect();
    // the mock's default verdict says search
    assert_eq!(flags, vec![true, true, false, false]);
    assert_eq!(decisions[1].reasoning, "mock classifier");
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_decisions_are_independent() {
    let mock = Arc::new(MockClassifier::always_failing());
    let arbiter = Arc::new(hybrid(config(2, 1000), &mock));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let arbiter = arbiter.clone();
        handles.push(tokio::spawn(async move {
            arbiter.decide(AMBIGUOUS, DecisionMode::Hybrid).await
        }));
    }
    for handle in handles {
        let d = handle.await.unwrap();
        assert_eq!(d, decide_heuristic(&config(2, 1000), AMBIGUOUS));
    }
    assert_eq!(mock.call_count(), 16);
}
