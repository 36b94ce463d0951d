//! Retry configuration for the transport layer.

use std::time::Duration;

use http::StatusCode;

/// HTTP status codes treated as transient failures.
///
/// A response with one of these statuses is retried; any other status is a
/// terminal outcome of the exchange, including 4xx business errors.
pub const TRANSIENT_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,

    /// Base unit for exponential backoff. The delay before re-attempt `n`
    /// (1-indexed) is `base_delay * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Whether a response status is transient and should be retried.
    ///
    /// # Example
    ///
    /// ```
    /// use http::StatusCode;
    /// use paytabs::config::RetryConfig;
    ///
    /// let config = RetryConfig::default();
    /// assert!(config.is_transient(StatusCode::SERVICE_UNAVAILABLE));
    /// assert!(!config.is_transient(StatusCode::BAD_REQUEST));
    /// ```
    pub fn is_transient(&self, status: StatusCode) -> bool {
        TRANSIENT_STATUS_CODES.contains(&status.as_u16())
    }

    /// Backoff delay before re-attempt number `retries` (1-indexed).
    ///
    /// With the default one-second base, the first re-attempt waits 2s,
    /// the second 4s, the third 8s.
    pub fn delay_for(&self, retries: u32) -> Duration {
        let factor = 1u64.checked_shl(retries).unwrap_or(u64::MAX);
        self.base_delay.saturating_mul(factor.min(u32::MAX as u64) as u32)
    }
}
