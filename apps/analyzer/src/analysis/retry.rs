//! Bounded retry around a single-shot `TextGenerator`.
//!
//! Every failure is treated the same way: log it, back off `2^attempt`
//! seconds, try again. No jitter, no error classification.

use std::time::Duration;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (0-based): 1s, 2s, 4s, ...
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_secs(1u64 << attempt)
    }
}

/// Result of one model call, with the failure already rendered for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded(String),
    Failed(String),
}

async fn attempt(generator: &dyn TextGenerator, prompt: &str) -> AttemptOutcome {
    match generator.generate(prompt).await {
        Ok(text) => AttemptOutcome::Succeeded(text),
        Err(e) => AttemptOutcome::Failed(e.to_string()),
    }
}

/// Calls the generator until it succeeds or the policy runs out of attempts.
/// Sleeps only between attempts, never after the last one.
pub async fn generate_with_retry(
    generator: &dyn TextGenerator,
    prompt: &str,
    policy: RetryPolicy,
) -> Result<String, AppError> {
    for n in 0..policy.max_attempts {
        match attempt(generator, prompt).await {
            AttemptOutcome::Succeeded(text) => {
                info!("Model responded on attempt {}", n + 1);
                return Ok(text);
            }
            AttemptOutcome::Failed(reason) => {
                warn!("AI request failed (attempt {}): {reason}", n + 1);
                if n + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.backoff_delay(n)).await;
                }
            }
        }
    }

    Err(AppError::ServiceUnavailable {
        attempts: policy.max_attempts,
    })
}
