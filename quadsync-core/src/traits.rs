//! Core trait seams shared across crates.
//!
//! `PatchEmitter` is the producer side (the interception wrapper pushes
//! into it, the distribution engine implements it). `PatchSink` is the
//! consumer side (the batching layer and sync facade drive it).

use crate::error::Result;
use crate::patch::Patch;
use async_trait::async_trait;

/// Accepts patches from a producer.
///
/// Implemented by the distribution engine. `emit` completes once every
/// subscriber registered at emission time has finished processing the
/// patch; handler failures are aggregated into the returned error and
/// never abort the producer's own mutation (the caller decides whether
/// to log or propagate).
#[async_trait]
pub trait PatchEmitter: Send + Sync {
    /// Push one patch and wait for all current subscribers to process it.
    async fn emit(&self, patch: Patch) -> Result<()>;
}

#[async_trait]
impl<T: PatchEmitter + ?Sized> PatchEmitter for std::sync::Arc<T> {
    async fn emit(&self, patch: Patch) -> Result<()> {
        (**self).emit(patch).await
    }
}

/// Applies a batch of patches to a downstream store.
///
/// Patches are applied in slice order; within each patch, deletions are
/// applied before insertions. An empty slice and empty patches are
/// no-ops.
#[async_trait]
pub trait PatchSink: Send + Sync {
    /// Apply the patches, deletions before insertions within each.
    async fn apply(&self, patches: &[Patch]) -> Result<()>;
}

#[async_trait]
impl<T: PatchSink + ?Sized> PatchSink for std::sync::Arc<T> {
    async fn apply(&self, patches: &[Patch]) -> Result<()> {
        (**self).apply(patches).await
    }
}
