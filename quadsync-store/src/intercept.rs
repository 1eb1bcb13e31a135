//! Change interception
//!
//! `PatchedStore` decorates any `QuadStore` so that every structural
//! mutation additionally produces exactly one [`Patch`], without altering
//! the store's own behavior or results. The capability surface is
//! enumerated explicitly — every mutating operation is instrumented,
//! every non-mutating operation forwards untouched and never emits.
//!
//! Ordering contract: the underlying mutation completes first, then the
//! patch is emitted, so a subscriber that queries the store upon
//! receiving a patch sees at least that mutation applied. If the
//! mutation fails, the error propagates and no patch is emitted.
//! Delivery failures reported by the emitter never fail the caller's
//! mutation; they are logged here and remain observable through the
//! engine's failure channel.

use crate::error::Result;
use crate::pattern::QuadPattern;
use crate::traits::QuadStore;
use async_trait::async_trait;
use quadsync_core::{Patch, PatchEmitter, Quad};
use tracing::warn;

/// A declarative bulk update statement.
///
/// Decomposed into the equivalent bulk mutation before interception, so
/// one declarative statement yields exactly one patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    /// Insert these facts.
    InsertData(Vec<Quad>),
    /// Delete these facts.
    DeleteData(Vec<Quad>),
}

/// Interception decorator over a quad store.
///
/// Behaviorally identical to the wrapped store; additionally emits one
/// patch per mutating call (bulk variants emit a single patch covering
/// the whole batch — this is what gives a caller's bulk operation
/// atomic-patch semantics).
pub struct PatchedStore<S, E> {
    store: S,
    emitter: E,
}

impl<S, E> PatchedStore<S, E>
where
    S: QuadStore,
    E: PatchEmitter,
{
    /// Wrap a store with an emitter.
    pub fn new(store: S, emitter: E) -> Self {
        Self { store, emitter }
    }

    /// Access the wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a declarative update statement as one bulk mutation.
    pub async fn apply_update(&self, update: Update) -> Result<()> {
        match update {
            Update::InsertData(quads) => self.add_many(quads).await,
            Update::DeleteData(quads) => self.remove_many(quads).await,
        }
    }

    /// Fire-and-forward emission.
    ///
    /// The await here is the back-pressure point: the caller's mutation
    /// does not return until all current subscribers acknowledged the
    /// patch. Handler failures are surfaced by the engine; the mutation
    /// itself already succeeded and its result is not altered.
    async fn forward(&self, patch: Patch) {
        if patch.is_empty() {
            return;
        }
        if let Err(e) = self.emitter.emit(patch).await {
            warn!(error = %e, "patch delivery reported subscriber failures");
        }
    }
}

#[async_trait]
impl<S, E> QuadStore for PatchedStore<S, E>
where
    S: QuadStore,
    E: PatchEmitter,
{
    async fn add(&self, quad: Quad) -> Result<()> {
        self.store.add(quad.clone()).await?;
        self.forward(Patch::insert_all(vec![quad])).await;
        Ok(())
    }

    async fn add_many(&self, quads: Vec<Quad>) -> Result<()> {
        self.store.add_many(quads.clone()).await?;
        self.forward(Patch::insert_all(quads)).await;
        Ok(())
    }

    async fn remove(&self, quad: Quad) -> Result<()> {
        self.store.remove(quad.clone()).await?;
        self.forward(Patch::delete_all(vec![quad])).await;
        Ok(())
    }

    async fn remove_many(&self, quads: Vec<Quad>) -> Result<()> {
        self.store.remove_many(quads.clone()).await?;
        self.forward(Patch::delete_all(quads)).await;
        Ok(())
    }

    async fn match_pattern(&self, pattern: &QuadPattern) -> Result<Vec<Quad>> {
        self.store.match_pattern(pattern).await
    }

    async fn len(&self) -> Result<usize> {
        self.store.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use quadsync_core::Term;
    use std::sync::Mutex;

    /// Records every emitted patch.
    #[derive(Default)]
    struct CollectingEmitter {
        patches: Mutex<Vec<Patch>>,
    }

    impl CollectingEmitter {
        fn take(&self) -> Vec<Patch> {
            std::mem::take(&mut self.patches.lock().unwrap())
        }
    }

    #[async_trait]
    impl PatchEmitter for CollectingEmitter {
        async fn emit(&self, patch: Patch) -> quadsync_core::Result<()> {
            self.patches.lock().unwrap().push(patch);
            Ok(())
        }
    }

    /// A store whose mutations always fail.
    struct FailingStore;

    #[async_trait]
    impl QuadStore for FailingStore {
        async fn add(&self, _quad: Quad) -> Result<()> {
            Err(StoreError::backend("disk full"))
        }
        async fn add_many(&self, _quads: Vec<Quad>) -> Result<()> {
            Err(StoreError::backend("disk full"))
        }
        async fn remove(&self, _quad: Quad) -> Result<()> {
            Err(StoreError::backend("disk full"))
        }
        async fn remove_many(&self, _quads: Vec<Quad>) -> Result<()> {
            Err(StoreError::backend("disk full"))
        }
        async fn match_pattern(&self, _pattern: &QuadPattern) -> Result<Vec<Quad>> {
            Ok(Vec::new())
        }
        async fn len(&self) -> Result<usize> {
            Ok(0)
        }
    }

    fn quad(n: u32) -> Quad {
        Quad::new(
            Term::iri(format!("http://example.org/s{n}")),
            Term::iri("http://example.org/p"),
            Term::literal(format!("v{n}")),
        )
    }

    #[tokio::test]
    async fn test_single_mutations_emit_one_patch_each() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());

        store.add(quad(1)).await.unwrap();
        store.remove(quad(1)).await.unwrap();

        let patches = store.emitter.take();
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0], Patch::insert_all(vec![quad(1)]));
        assert_eq!(patches[1], Patch::delete_all(vec![quad(1)]));
    }

    #[tokio::test]
    async fn test_bulk_mutation_emits_single_patch() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());

        store.add_many(vec![quad(1), quad(2), quad(3)]).await.unwrap();
        store.remove_many(vec![quad(1), quad(2)]).await.unwrap();

        let patches = store.emitter.take();
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].insertions.len(), 3);
        assert!(patches[0].deletions.is_empty());
        assert_eq!(patches[1].deletions.len(), 2);
        assert!(patches[1].insertions.is_empty());
    }

    #[tokio::test]
    async fn test_reads_never_emit() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());
        store.add(quad(1)).await.unwrap();
        store.emitter.take();

        let _ = store.match_pattern(&QuadPattern::any()).await.unwrap();
        let _ = store.len().await.unwrap();
        let _ = store.is_empty().await.unwrap();

        assert!(store.emitter.take().is_empty());
    }

    #[tokio::test]
    async fn test_empty_bulk_suppresses_noop_patch() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());
        store.add_many(Vec::new()).await.unwrap();
        assert!(store.emitter.take().is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_emits_nothing() {
        let store = PatchedStore::new(FailingStore, CollectingEmitter::default());

        assert!(store.add(quad(1)).await.is_err());
        assert!(store.add_many(vec![quad(1)]).await.is_err());
        assert!(store.remove(quad(1)).await.is_err());

        assert!(store.emitter.take().is_empty());
    }

    #[tokio::test]
    async fn test_declarative_update_yields_one_patch() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());

        store
            .apply_update(Update::InsertData(vec![quad(1), quad(2)]))
            .await
            .unwrap();

        let patches = store.emitter.take();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].insertions.len(), 2);
    }

    #[tokio::test]
    async fn test_wrapper_preserves_store_behavior() {
        let store = PatchedStore::new(MemoryStore::new(), CollectingEmitter::default());
        store.add_many(vec![quad(1), quad(2)]).await.unwrap();
        store.remove(quad(1)).await.unwrap();

        let all = store.match_pattern(&QuadPattern::any()).await.unwrap();
        assert_eq!(all, vec![quad(2)]);
        assert_eq!(store.len().await.unwrap(), 1);
    }
}
