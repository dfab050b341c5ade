//! Bounded retry with exponential backoff for flaky oracle calls.

use std::time::Duration;

use rand::Rng;

/// How persistently to repeat a failing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first included. Treated as at least one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each attempt after.
    pub base_delay: Duration,
    /// Upper bound of the random delay added on top of the backoff.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            jitter: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after a failed attempt, zero-indexed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = 2_u64.saturating_pow(attempt);
        let base = (self.base_delay.as_millis() as u64).saturating_mul(multiplier);
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ms)
        };
        Duration::from_millis(base.saturating_add(jitter))
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// Sleeps between attempts, never after the last. The final error is
/// returned unchanged.
pub fn with_backoff<T, E, F>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= attempts {
                    tracing::warn!(attempts = attempt, error = %err, "giving up after retries");
                    return Err(err);
                }
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying after failure"
                );
                std::thread::sleep(delay);
            }
        }
    }
}
