//! Primary-store capability traits
//!
//! The capability surface the sync core consumes from a primary store:
//! single and bulk mutation, procedural pattern matching, and size. A
//! backend that additionally offers declarative graph-pattern querying
//! implements [`SparqlSource`] on top.
//!
//! Mutations are awaitable and must be externally visible to subsequent
//! `match_pattern` calls on the same store by the time they return.

use crate::error::Result;
use crate::pattern::QuadPattern;
use async_trait::async_trait;
use quadsync_core::Quad;

/// A mutable quad store.
#[async_trait]
pub trait QuadStore: Send + Sync {
    /// Add one quad.
    async fn add(&self, quad: Quad) -> Result<()>;

    /// Add a batch of quads as one operation.
    async fn add_many(&self, quads: Vec<Quad>) -> Result<()>;

    /// Remove one quad.
    async fn remove(&self, quad: Quad) -> Result<()>;

    /// Remove a batch of quads as one operation.
    async fn remove_many(&self, quads: Vec<Quad>) -> Result<()>;

    /// Return all quads matching the pattern.
    async fn match_pattern(&self, pattern: &QuadPattern) -> Result<Vec<Quad>>;

    /// Number of quads currently stored.
    async fn len(&self) -> Result<usize>;

    /// True when the store holds no quads.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

#[async_trait]
impl<T: QuadStore + ?Sized> QuadStore for std::sync::Arc<T> {
    async fn add(&self, quad: Quad) -> Result<()> {
        (**self).add(quad).await
    }

    async fn add_many(&self, quads: Vec<Quad>) -> Result<()> {
        (**self).add_many(quads).await
    }

    async fn remove(&self, quad: Quad) -> Result<()> {
        (**self).remove(quad).await
    }

    async fn remove_many(&self, quads: Vec<Quad>) -> Result<()> {
        (**self).remove_many(quads).await
    }

    async fn match_pattern(&self, pattern: &QuadPattern) -> Result<Vec<Quad>> {
        (**self).match_pattern(pattern).await
    }

    async fn len(&self) -> Result<usize> {
        (**self).len().await
    }
}

/// A store with a declarative graph-pattern query facility.
///
/// Used by the snapshot path on backends that can evaluate a CONSTRUCT
/// query themselves; backends without it fall back to procedural
/// matching, which must produce the same logical result set.
#[async_trait]
pub trait SparqlSource: Send + Sync {
    /// Evaluate a CONSTRUCT query and return the constructed quads.
    async fn query_construct(&self, query: &str) -> Result<Vec<Quad>>;
}
