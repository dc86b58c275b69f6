use std::future::Future;
use std::time::Duration;

use crate::config::constants::{RETRY_BASE_DELAY_SECS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS};
use crate::errors::{ActionError, ActionResult};

/// Exponential backoff parameters for a retried call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(RETRY_BASE_DELAY_SECS),
            max_delay: Duration::from_secs(RETRY_MAX_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt + 1`, doubling from the base and
    /// clamped to `max_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(1u32 << exp);
        delay.min(self.max_delay)
    }

    /// Run `operation` up to `max_attempts` times. Only transient errors
    /// (connection failures, timeouts) trigger another attempt; a received
    /// error status aborts immediately.
    pub async fn run<T, F, Fut>(&self, name: &str, operation: F) -> ActionResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ActionResult<T>>,
    {
        let mut last_error: Option<ActionError> = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_after(attempt);
                    log::warn!(
                        "⚠️ {} failed (attempt {} of {}): {}. Retrying in {}s...",
                        name,
                        attempt,
                        self.max_attempts,
                        e,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Unreachable unless max_attempts is zero; treat that as a misuse.
        Err(last_error.unwrap_or_else(|| ActionError::config_error("retry policy with zero attempts")))
    }
}
