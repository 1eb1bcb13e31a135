//! Patch - one atomic insert/delete delta
//!
//! A patch is the unit of change propagation: everything a single mutation
//! call did to the store, as observed at the store. Compliant consumers
//! apply `deletions` before `insertions` within one patch, so a quad that
//! is both stale-deleted and re-inserted in the same batch survives.

use crate::filter::QuadFilter;
use crate::quad::Quad;
use serde::{Deserialize, Serialize};

/// An atomic insert/delete delta as observed at the primary store.
///
/// A patch with both sequences empty is a legal no-op: producers may
/// suppress it, consumers must tolerate it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// Quads added by the mutation
    pub insertions: Vec<Quad>,
    /// Quads removed by the mutation
    pub deletions: Vec<Quad>,
}

impl Patch {
    /// Create a patch from explicit insertions and deletions.
    pub fn new(insertions: Vec<Quad>, deletions: Vec<Quad>) -> Self {
        Self {
            insertions,
            deletions,
        }
    }

    /// A pure-insertion patch.
    pub fn insert_all(quads: Vec<Quad>) -> Self {
        Self {
            insertions: quads,
            deletions: Vec::new(),
        }
    }

    /// A pure-deletion patch.
    pub fn delete_all(quads: Vec<Quad>) -> Self {
        Self {
            insertions: Vec::new(),
            deletions: quads,
        }
    }

    /// True when the patch carries no change at all.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty()
    }

    /// Total number of quads carried (insertions + deletions).
    pub fn len(&self) -> usize {
        self.insertions.len() + self.deletions.len()
    }

    /// Restrict this patch to quads whose object matches `filter`.
    ///
    /// Relative order of the surviving quads is preserved. Used by live
    /// subscriptions that only index certain literal kinds; the filtered
    /// result may be empty (a legal no-op).
    pub fn filtered(&self, filter: &QuadFilter) -> Self {
        Self {
            insertions: self
                .insertions
                .iter()
                .filter(|q| filter.matches(&q.object))
                .cloned()
                .collect(),
            deletions: self
                .deletions
                .iter()
                .filter(|q| filter.matches(&q.object))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ObjectKind, QuadFilter};
    use crate::term::Term;
    use crate::vocab;

    fn quad(object: Term) -> Quad {
        Quad::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            object,
        )
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let patch = Patch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.len(), 0);
    }

    #[test]
    fn test_insert_all_delete_all() {
        let insert = Patch::insert_all(vec![quad(Term::literal("a"))]);
        assert_eq!(insert.insertions.len(), 1);
        assert!(insert.deletions.is_empty());

        let delete = Patch::delete_all(vec![quad(Term::literal("a"))]);
        assert!(delete.insertions.is_empty());
        assert_eq!(delete.deletions.len(), 1);
    }

    #[test]
    fn test_filtered_keeps_order_and_drops_nonmatching() {
        let patch = Patch::new(
            vec![
                quad(Term::literal("plain")),
                quad(Term::lang_string("tagged", "en")),
                quad(Term::typed("42", vocab::xsd::INTEGER)),
                quad(Term::iri("http://example.org/o")),
            ],
            vec![quad(Term::lang_string("weg", "de"))],
        );

        let filter = QuadFilter::new(ObjectKind::String);
        let filtered = patch.filtered(&filter);
        assert_eq!(filtered.insertions.len(), 1);
        assert_eq!(
            filtered.insertions[0].object,
            Term::literal("plain")
        );
        assert!(filtered.deletions.is_empty());

        let all = patch.filtered(&QuadFilter::default());
        // "all" keeps every literal, drops the IRI object
        assert_eq!(all.insertions.len(), 3);
        assert_eq!(all.deletions.len(), 1);
    }
}
