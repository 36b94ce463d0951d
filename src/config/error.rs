//! Configuration error types.

use thiserror::Error;

/// Errors produced while building a [`crate::config::PayTabsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory configuration field was not provided.
    #[error("Missing required configuration field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A required environment variable was absent or unreadable.
    #[error("Environment error: {message}")]
    Environment {
        /// Description of the environment problem.
        message: String,
    },
}
