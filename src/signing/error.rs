//! Error types for request signing.

use thiserror::Error;

/// Errors that can occur while signing a request.
///
/// Signing errors are fatal configuration problems. The client never falls
/// back to sending an unsigned request when signing fails.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The configured private key could not be parsed.
    ///
    /// Both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`) PEM containers are supported; anything
    /// else is rejected.
    #[error("invalid private key: {message}")]
    InvalidKey {
        /// Description of the key parsing failure.
        message: String,
    },

    /// The signature computation itself failed.
    #[error("signature generation failed: {message}")]
    SignatureFailed {
        /// Description of the signing failure.
        message: String,
    },

    /// The request target URI could not be interpreted.
    #[error("invalid request URI: {message}")]
    InvalidUri {
        /// Description of the URI problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SigningError::InvalidKey {
            message: "no PEM header found".to_string(),
        };
        assert_eq!(err.to_string(), "invalid private key: no PEM header found");
    }
}
