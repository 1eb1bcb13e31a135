//! Shared error types for the patch core.
//!
//! These cover the boundaries every crate touches: patch delivery and
//! sink application. Store-specific errors live in `quadsync-store`.

use thiserror::Error;

/// A single subscriber's handler failure, surfaced on the emit completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberFailure {
    /// Numeric id of the failing subscriber.
    pub subscriber: u64,
    /// Handler error, rendered.
    pub message: String,
}

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more subscriber handlers failed while processing a patch.
    ///
    /// Delivery to the remaining subscribers and the producer's mutation
    /// are unaffected; this is surfaced so data loss at a consumer is
    /// never invisible.
    #[error("patch delivery failed for {n} subscriber(s)", n = .failures.len())]
    Delivery {
        /// Per-subscriber failures for this patch.
        failures: Vec<SubscriberFailure>,
    },

    /// Two structurally different quads mapped to the same content address.
    ///
    /// Fatal to the affected apply operation: the idempotency contract of
    /// downstream upsert/delete would otherwise be violated silently.
    #[error("content address collision on {id}")]
    AddressCollision {
        /// The colliding identifier.
        id: String,
    },

    /// Downstream sink failed to apply a patch.
    #[error("sink error: {message}")]
    Sink {
        /// Sink-reported failure.
        message: String,
    },
}

impl Error {
    /// Convenience constructor for sink failures.
    pub fn sink(message: impl Into<String>) -> Self {
        Error::Sink {
            message: message.into(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
