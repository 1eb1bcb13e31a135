//! Shared test harness for quadsync-engine integration tests.

// Not every integration test crate uses every helper; keep them
// centralized here and silence dead_code warnings in the ones that don't.
#![allow(dead_code)]

use async_trait::async_trait;
use quadsync_core::{Quad, QuadId, Result, Term};
use quadsync_engine::{SearchDocument, SearchHit, SearchIndex};
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Route tracing output through the test harness; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// In-memory search index backend: documents keyed by content address,
/// naive substring matching for `search`.
#[derive(Default)]
pub struct MemorySearchIndex {
    inner: Mutex<FxHashMap<QuadId, SearchDocument>>,
}

impl MemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// All currently indexed documents, in no particular order.
    pub fn documents(&self) -> Vec<SearchDocument> {
        self.inner.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.inner.lock().unwrap().contains_key(&QuadId::of(quad))
    }

    /// Sorted searchable text, handy for order-insensitive assertions.
    pub fn texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self
            .inner
            .lock()
            .unwrap()
            .values()
            .map(|d| d.text.clone())
            .collect();
        texts.sort();
        texts
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn upsert(&self, documents: Vec<SearchDocument>) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for document in documents {
            inner.insert(document.id.clone(), document);
        }
        Ok(())
    }

    async fn delete(&self, ids: Vec<QuadId>) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for id in ids {
            inner.remove(&id);
        }
        Ok(())
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let inner = self.inner.lock().unwrap();
        let mut hits: Vec<SearchHit> = inner
            .values()
            .filter(|d| d.text.contains(text))
            .map(|d| SearchHit {
                subject: d.subject.clone(),
                score: 1.0,
            })
            .collect();
        hits.truncate(limit);
        Ok(hits)
    }
}

// =============================================================================
// Quad fixtures
// =============================================================================

pub fn name_quad(subject: &str, name: &str) -> Quad {
    Quad::new(
        Term::iri(format!("http://example.org/{subject}")),
        Term::iri("http://schema.org/name"),
        Term::literal(name),
    )
}

pub fn lang_quad(subject: &str, label: &str, lang: &str) -> Quad {
    Quad::new(
        Term::iri(format!("http://example.org/{subject}")),
        Term::iri("http://www.w3.org/2000/01/rdf-schema#label"),
        Term::lang_string(label, lang),
    )
}

pub fn link_quad(subject: &str, object: &str) -> Quad {
    Quad::new(
        Term::iri(format!("http://example.org/{subject}")),
        Term::iri("http://schema.org/knows"),
        Term::iri(format!("http://example.org/{object}")),
    )
}
