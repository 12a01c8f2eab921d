//! Retry policy for gateway calls.

use super::error::GatewayError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// How many times, and how patiently, a transient failure is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; at least 1 is always made
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles each time
    pub initial_delay: Duration,
    /// Upper bound of random extra delay added to each wait
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            jitter: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            jitter: Duration::ZERO,
        }
    }

    /// The default attempt count with no waiting between attempts.
    pub fn none() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Wait after the failed attempt with 0-based index `attempt`:
    /// `initial_delay * 2^attempt`, plus up to `jitter`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let base = self.initial_delay.saturating_mul(factor);
        if self.jitter.is_zero() {
            return base;
        }
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = rand::thread_rng().gen_range(0..=jitter_ms);
        base.saturating_add(Duration::from_millis(extra))
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Outcome of a single failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptError {
    /// Network-level failure; worth retrying
    Transient(String),
    /// Anything else; returned immediately
    Permanent(GatewayError),
}

/// Runs `operation` until it succeeds, fails permanently, or the policy's
/// attempts are exhausted.
///
/// The operation receives the 0-based attempt index. No wait follows the
/// final attempt.
///
/// # Errors
///
/// - The permanent error, unchanged
/// - `GatewayError::Connection` once every attempt failed transiently
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, GatewayError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let attempts = policy.attempts();
    let mut last_error = String::new();

    for attempt in 0..attempts {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(AttemptError::Permanent(err)) => return Err(err),
            Err(AttemptError::Transient(message)) => {
                last_error = message;
                if attempt + 1 < attempts {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %last_error,
                        "Transient gateway failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    tracing::warn!(
        operation = operation_name,
        attempts,
        error = %last_error,
        "Gateway retries exhausted"
    );
    Err(GatewayError::connection(format!(
        "Failed to connect to language model after {attempts} attempts: {last_error}"
    )))
}
