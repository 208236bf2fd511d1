//! Generic retry logic with linear backoff
//!
//! Provides a bounded retry mechanism for fallible async operations against
//! volatile third-party services. Backoff grows linearly with the attempt
//! number; the final failure is re-raised to the caller unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use application::retry::{RetryConfig, retry};
//!
//! let config = RetryConfig::default();
//! let result = retry(&config, || async {
//!     provider.call().await
//! }).await;
//! ```

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for retry behavior with linear backoff
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds (default: 1000ms)
    ///
    /// The wait after failed attempt `k` is `base_delay_ms * k`.
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Cap on any single backoff delay in milliseconds (default: 10000ms)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay() -> u64 {
    1000
}

const fn default_max_delay() -> u64 {
    10_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom parameters
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            base_delay_ms,
            max_delay_ms: default_max_delay(),
        }
    }

    /// Calculate the delay after a failed attempt (attempts numbered from 1)
    ///
    /// Linear backoff: `base_delay_ms * attempt`, capped at `max_delay_ms`.
    #[must_use]
    pub const fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_ms.saturating_mul(attempt as u64);
        let capped = if delay > self.max_delay_ms {
            self.max_delay_ms
        } else {
            delay
        };
        Duration::from_millis(capped)
    }
}

/// Trait for errors that can be checked for retryability
pub trait Retryable {
    /// Returns true if this error is retryable
    fn is_retryable(&self) -> bool;
}

/// Retry result containing either success or the last error
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the final attempt
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries, 2 = one retry, etc.)
    pub attempts: u32,
    /// Total time spent including backoff waits
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    /// Check if the operation succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the operation failed
    #[must_use]
    pub const fn is_err(&self) -> bool {
        self.result.is_err()
    }

    /// Convert to standard Result, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Execute an async operation with retry logic
///
/// The operation runs up to `config.max_attempts` times. After a failed
/// attempt `k < max_attempts` with a retryable error, the executor waits
/// `base_delay_ms * k` and tries again. The failure of the final attempt is
/// returned unchanged; no delay follows it. Non-retryable errors
/// short-circuit immediately: transience classification belongs to the
/// error type, not the executor.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = std::time::Instant::now();
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(
                        attempts = attempt,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Operation succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                if !err.is_retryable() {
                    debug!(
                        attempts = attempt,
                        error = %err,
                        "Operation failed with non-retryable error"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts: attempt,
                        total_duration: start.elapsed(),
                    };
                }

                if attempt == max_attempts {
                    warn!(
                        attempts = attempt,
                        max_attempts = max_attempts,
                        error = %err,
                        "Operation failed after max attempts"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts: attempt,
                        total_duration: start.elapsed(),
                    };
                }

                let delay = config.delay_after_attempt(attempt);
                warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying"
                );

                tokio::time::sleep(delay).await;
            },
        }
    }

    unreachable!("loop returns on final attempt")
}

/// Execute an async operation with retry logic, returning only the Result
///
/// This is a convenience wrapper around `with_retry` that discards metadata.
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.into_result()
}
