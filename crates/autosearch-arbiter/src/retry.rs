// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential retry loop with per-attempt deadline and exponential backoff.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Attempting ──ok──▶ Succeeded
//!     │ err/timeout
//!     ├── attempts left ──▶ RetryWait ──sleep──▶ Attempting
//!     └── none left ──────▶ Exhausted
//! ```
//!
//! At most one attempt is in flight at a time. A timed-out attempt is
//! cancelled by dropping its future.

use std::future::Future;
use std::time::{Duration, Instant};

use autosearch_core::{ModelError, SearchConfig};
use tracing::{debug, warn};

use crate::recording;

/// Delay before the second attempt; doubles for every further retry.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// Bounds for one retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least 1).
    pub max_attempts: u32,
    /// Hard deadline for each attempt.
    pub attempt_timeout: Duration,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            max_attempts: config.max_retries(),
            attempt_timeout: config.timeout(),
            initial_backoff: INITIAL_BACKOFF,
        }
    }

    /// Delay after failed attempt number `attempt` (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }
}

/// Terminal result of [`run_with_retry`].
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: ModelError },
}

enum State<T> {
    Attempting { attempt: u32 },
    RetryWait { next_attempt: u32, delay: Duration },
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: ModelError },
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. Every [`ModelError`] that
/// reports itself retryable triggers another attempt while attempts remain.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut state = State::Attempting { attempt: 1 };

    loop {
        state = match state {
            State::Attempting { attempt } => {
                let started = Instant::now();
                let result = match tokio::time::timeout(policy.attempt_timeout, op(attempt)).await
                {
                    Ok(result) => result,
                    Err(_elapsed) => Err(ModelError::Timeout {
                        duration: policy.attempt_timeout,
                    }),
                };
                recording::record_model_latency(started.elapsed().as_secs_f64());

                match result {
                    Ok(value) => {
                        recording::record_model_attempt("success");
                        State::Succeeded {
                            value,
                            attempts: attempt,
                        }
                    }
                    Err(e) => {
                        recording::record_model_attempt(e.kind());
                        if e.is_retryable() && attempt < max_attempts {
                            let delay = policy.backoff_after(attempt);
                            warn!(
                                attempt,
                                max_attempts,
                                error = %e,
                                backoff_ms = delay.as_millis() as u64,
                                "model attempt failed, will retry"
                            );
                            State::RetryWait {
                                next_attempt: attempt + 1,
                                delay,
                            }
                        } else {
                            warn!(attempt, max_attempts, error = %e, "model attempt failed, no attempts left");
                            State::Exhausted {
                                attempts: attempt,
                                last_error: e,
                            }
                        }
                    }
                }
            }
            State::RetryWait {
                next_attempt,
                delay,
            } => {
                debug!(next_attempt, delay_ms = delay.as_millis() as u64, "backing off");
                tokio::time::sleep(delay).await;
                State::Attempting {
                    attempt: next_attempt,
                }
            }
            State::Succeeded { value, attempts } => {
                return RetryOutcome::Succeeded { value, attempts };
            }
            State::Exhausted {
                attempts,
                last_error,
            } => {
                return RetryOutcome::Exhausted {
                    attempts,
                    last_error,
                };
            }
        };
    }
}
