//! Engine-level error type.
//!
//! Wraps the core and store errors that the facade composes; the hub and
//! batcher themselves speak `quadsync_core::Error` so handlers and sinks
//! share one vocabulary across crates.

use thiserror::Error;

/// Errors from facade-level sync operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Delivery, sink, or content-address failure.
    #[error(transparent)]
    Core(#[from] quadsync_core::Error),

    /// Primary-store failure during snapshot catch-up.
    #[error(transparent)]
    Store(#[from] quadsync_store::StoreError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
