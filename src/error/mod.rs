//! Error types for the PayTabs client.
//!
//! Errors are categorized by their source: configuration problems, signing
//! failures, transport faults, and serialization issues. Transient HTTP
//! responses (408, 429, 5xx) are *not* errors — the retry loop handles them
//! internally and the caller always receives a response envelope for any
//! completed HTTP exchange. The only exceptional path is a connection-level
//! fault where no response was received at all.

use std::time::Duration;
use thiserror::Error;

use crate::signing::SigningError;

/// Result type alias for PayTabs operations.
pub type PayTabsResult<T> = std::result::Result<T, PayTabsError>;

/// Top-level error type for the PayTabs client.
#[derive(Debug, Error)]
pub enum PayTabsError {
    /// Configuration-related errors.
    ///
    /// These errors occur when the client is misconfigured, e.g. a mandatory
    /// configuration value is missing.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// Request signing errors.
    ///
    /// These errors occur when the canonical request cannot be signed,
    /// most notably when the configured private key is unparseable. They
    /// are fatal and never retried.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Transport and network errors.
    ///
    /// These errors occur when no HTTP response was received at all:
    /// connection refused, DNS failure, or a malformed response stream.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Request timeout errors.
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// Serialization errors.
    ///
    /// These errors occur when serializing a request body or deserializing
    /// a response payload fails.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },

    /// The call was cancelled before completing.
    ///
    /// Raised when a configured cancellation token fires between attempts.
    /// Distinct from retry exhaustion, which returns the last transient
    /// response rather than an error.
    #[error("Call cancelled after {retries} retries ({elapsed:?} elapsed)")]
    Cancelled {
        /// Retries consumed before cancellation.
        retries: u32,
        /// Time spent before cancellation.
        elapsed: Duration,
    },
}

impl PayTabsError {
    /// Whether a fresh attempt of the same call could plausibly succeed.
    ///
    /// Transient HTTP statuses never reach this type; only connection-level
    /// faults and timeouts qualify here.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PayTabsError::Transport { .. } | PayTabsError::Timeout { .. }
        )
    }
}

impl From<serde_json::Error> for PayTabsError {
    fn from(err: serde_json::Error) -> Self {
        PayTabsError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PayTabsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PayTabsError::Timeout {
                message: err.to_string(),
            }
        } else {
            PayTabsError::Transport {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PayTabsError = json_err.into();
        assert!(matches!(err, PayTabsError::Serialization { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PayTabsError::Configuration {
            message: "private key is missing".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: private key is missing");

        let err = PayTabsError::Cancelled {
            retries: 1,
            elapsed: Duration::from_millis(2500),
        };
        assert!(err.to_string().contains("after 1 retries"));
    }

    #[test]
    fn test_is_retryable() {
        let transport = PayTabsError::Transport {
            message: "connection refused".to_string(),
            source: None,
        };
        assert!(transport.is_retryable());
        assert!(PayTabsError::Timeout {
            message: "deadline exceeded".to_string()
        }
        .is_retryable());
        assert!(!PayTabsError::Serialization {
            message: "bad json".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_signing_error_conversion() {
        let err: PayTabsError = SigningError::InvalidKey {
            message: "unsupported PEM container".to_string(),
        }
        .into();
        assert!(matches!(err, PayTabsError::Signing(_)));
    }
}
