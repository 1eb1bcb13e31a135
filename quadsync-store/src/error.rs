//! Store-boundary error types.

use thiserror::Error;

/// Errors from primary-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend does not offer declarative querying.
    #[error("declarative query not supported: {message}")]
    QueryUnsupported {
        /// What was attempted.
        message: String,
    },

    /// Backend-reported failure (storage, I/O, engine internals).
    #[error("store backend error: {message}")]
    Backend {
        /// Backend-reported failure.
        message: String,
    },
}

impl StoreError {
    /// Convenience constructor for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
