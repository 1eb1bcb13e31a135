//! In-memory reference backend
//!
//! Set semantics with stable insertion order: adding a quad that is
//! already present and removing one that is absent are storage no-ops.
//! Used as the reference `QuadStore` in tests and small deployments;
//! production backends adapt an existing triple-store engine instead.

use crate::error::Result;
use crate::pattern::QuadPattern;
use crate::traits::QuadStore;
use async_trait::async_trait;
use quadsync_core::Quad;
use rustc_hash::FxHashSet;
use std::sync::Mutex;

#[derive(Default)]
struct MemoryInner {
    /// Quads in insertion order.
    quads: Vec<Quad>,
    /// Membership index.
    index: FxHashSet<Quad>,
}

/// In-memory quad store with insertion-ordered set semantics.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // Mutation sections cannot panic; recover the data on poison.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert_one(inner: &mut MemoryInner, quad: Quad) {
        if inner.index.insert(quad.clone()) {
            inner.quads.push(quad);
        }
    }

    fn remove_one(inner: &mut MemoryInner, quad: &Quad) {
        if inner.index.remove(quad) {
            if let Some(pos) = inner.quads.iter().position(|q| q == quad) {
                inner.quads.remove(pos);
            }
        }
    }
}

#[async_trait]
impl QuadStore for MemoryStore {
    async fn add(&self, quad: Quad) -> Result<()> {
        let mut inner = self.lock();
        Self::insert_one(&mut inner, quad);
        Ok(())
    }

    async fn add_many(&self, quads: Vec<Quad>) -> Result<()> {
        let mut inner = self.lock();
        for quad in quads {
            Self::insert_one(&mut inner, quad);
        }
        Ok(())
    }

    async fn remove(&self, quad: Quad) -> Result<()> {
        let mut inner = self.lock();
        Self::remove_one(&mut inner, &quad);
        Ok(())
    }

    async fn remove_many(&self, quads: Vec<Quad>) -> Result<()> {
        let mut inner = self.lock();
        for quad in &quads {
            Self::remove_one(&mut inner, quad);
        }
        Ok(())
    }

    async fn match_pattern(&self, pattern: &QuadPattern) -> Result<Vec<Quad>> {
        let inner = self.lock();
        Ok(inner
            .quads
            .iter()
            .filter(|q| pattern.matches(q))
            .cloned()
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.lock().quads.len())
    }
}
