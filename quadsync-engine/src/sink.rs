//! Search-store sink
//!
//! `SearchPatchSink` drives a downstream search index from patches:
//! deletions become `delete(id)` and insertions become `upsert(doc)`,
//! both keyed by the quad's content address so repeated delivery of the
//! same patch is idempotent at the index.
//!
//! The index itself (tokenization, scoring, persistence) is an external
//! collaborator behind [`SearchIndex`]; this module only owns the
//! patch-to-document mapping and the delete-before-insert ordering.

use async_trait::async_trait;
use quadsync_core::{Error, Patch, PatchSink, Quad, QuadId, Result, Term};
use rustc_hash::FxHashMap;

/// One indexable document derived from a literal-object quad.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchDocument {
    /// Content address of the source quad; the index primary key.
    pub id: QuadId,
    /// Subject identifier (IRI, or `_:label` for blank nodes).
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// The literal's lexical value — the searchable text.
    pub text: String,
    /// Language tag, when the literal carries one.
    pub language: Option<String>,
}

/// A scored search result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    /// Subject identifier of the matching document.
    pub subject: String,
    /// Backend-specific relevance score.
    pub score: f64,
}

/// The downstream search/ranking store boundary.
///
/// `upsert`/`delete` are driven by this core; `search` is consumed by
/// callers only.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace documents by id.
    async fn upsert(&self, documents: Vec<SearchDocument>) -> Result<()>;

    /// Remove documents by id; unknown ids are a no-op.
    async fn delete(&self, ids: Vec<QuadId>) -> Result<()>;

    /// Ranked full-text search.
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>>;
}

#[async_trait]
impl<T: SearchIndex + ?Sized> SearchIndex for std::sync::Arc<T> {
    async fn upsert(&self, documents: Vec<SearchDocument>) -> Result<()> {
        (**self).upsert(documents).await
    }

    async fn delete(&self, ids: Vec<QuadId>) -> Result<()> {
        (**self).delete(ids).await
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>> {
        (**self).search(text, limit).await
    }
}

/// Adapts a [`SearchIndex`] to the [`PatchSink`] contract.
pub struct SearchPatchSink<I> {
    index: I,
}

impl<I: SearchIndex> SearchPatchSink<I> {
    /// Wrap an index.
    pub fn new(index: I) -> Self {
        Self { index }
    }

    /// Access the wrapped index (for search calls).
    pub fn index(&self) -> &I {
        &self.index
    }
}

#[async_trait]
impl<I: SearchIndex> PatchSink for SearchPatchSink<I> {
    async fn apply(&self, patches: &[Patch]) -> Result<()> {
        // Collision tracking spans the whole apply: if two structurally
        // different quads ever map to one id, idempotency is broken and
        // the apply must fail rather than corrupt the index silently.
        let mut seen: FxHashMap<QuadId, Quad> = FxHashMap::default();

        for patch in patches {
            if patch.is_empty() {
                continue;
            }

            let mut ids = Vec::with_capacity(patch.deletions.len());
            for quad in &patch.deletions {
                ids.push(checked_id(&mut seen, quad)?);
            }
            if !ids.is_empty() {
                self.index.delete(ids).await?;
            }

            let mut documents = Vec::with_capacity(patch.insertions.len());
            for quad in &patch.insertions {
                let id = checked_id(&mut seen, quad)?;
                if let Some(document) = document_for(quad, id) {
                    documents.push(document);
                }
            }
            if !documents.is_empty() {
                self.index.upsert(documents).await?;
            }
        }
        Ok(())
    }
}

fn checked_id(seen: &mut FxHashMap<QuadId, Quad>, quad: &Quad) -> Result<QuadId> {
    let id = QuadId::of(quad);
    match seen.get(&id) {
        Some(existing) if existing != quad => Err(Error::AddressCollision { id: id.to_string() }),
        Some(_) => Ok(id),
        None => {
            seen.insert(id.clone(), quad.clone());
            Ok(id)
        }
    }
}

/// Build the index document for an insertion, or `None` when the object
/// is not a literal (nothing searchable to index).
fn document_for(quad: &Quad, id: QuadId) -> Option<SearchDocument> {
    let (value, language, _datatype) = quad.object.as_literal()?;
    Some(SearchDocument {
        id,
        subject: subject_string(&quad.subject),
        predicate: quad.predicate.as_iri().unwrap_or_default().to_string(),
        text: value.to_string(),
        language: language.map(str::to_string),
    })
}

fn subject_string(subject: &Term) -> String {
    match subject {
        Term::Iri(iri) => iri.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the order of delete/upsert calls.
    #[derive(Debug, Default)]
    struct CallLog {
        calls: Mutex<Vec<String>>,
    }

    impl CallLog {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchIndex for CallLog {
        async fn upsert(&self, documents: Vec<SearchDocument>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("upsert:{}", documents.len()));
            Ok(())
        }

        async fn delete(&self, ids: Vec<QuadId>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete:{}", ids.len()));
            Ok(())
        }

        async fn search(&self, _text: &str, _limit: usize) -> Result<Vec<SearchHit>> {
            Ok(Vec::new())
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
    async fn test_deletions_applied_before_insertions_per_patch() {
        let sink = SearchPatchSink::new(CallLog::default());
        let patch = Patch::new(vec![quad(1), quad(2)], vec![quad(3)]);

        sink.apply(&[patch, Patch::delete_all(vec![quad(1)])])
            .await
            .unwrap();

        assert_eq!(sink.index().calls(), vec!["delete:1", "upsert:2", "delete:1"]);
    }

    #[tokio::test]
    async fn test_empty_patches_are_noops() {
        let sink = SearchPatchSink::new(CallLog::default());
        sink.apply(&[Patch::default()]).await.unwrap();
        sink.apply(&[]).await.unwrap();
        assert!(sink.index().calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_literal_insertions_are_skipped() {
        let sink = SearchPatchSink::new(CallLog::default());
        let patch = Patch::insert_all(vec![Quad::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::iri("http://example.org/o"),
        )]);
        sink.apply(&[patch]).await.unwrap();
        assert!(sink.index().calls().is_empty());
    }

    #[tokio::test]
    async fn test_document_fields() {
        let q = Quad::new(
            Term::blank("b0"),
            Term::iri("http://schema.org/name"),
            Term::lang_string("Alice", "en"),
        );
        let doc = document_for(&q, QuadId::of(&q)).unwrap();
        assert_eq!(doc.subject, "_:b0");
        assert_eq!(doc.predicate, "http://schema.org/name");
        assert_eq!(doc.text, "Alice");
        assert_eq!(doc.language.as_deref(), Some("en"));
        assert_eq!(doc.id, QuadId::of(&q));
    }

    #[tokio::test]
    async fn test_same_quad_twice_is_not_a_collision() {
        let sink = SearchPatchSink::new(CallLog::default());
        // re-inserted and stale-deleted in the same apply
        let patch = Patch::new(vec![quad(1)], vec![quad(1)]);
        sink.apply(&[patch]).await.unwrap();
        assert_eq!(sink.index().calls(), vec!["delete:1", "upsert:1"]);
    }
}
