//! Quad - the atomic fact unit of the primary store
//!
//! A quad is an immutable (subject, predicate, object, graph) tuple.
//! Identity is structural, term by term; there is no reference identity
//! anywhere in the core.

use crate::term::{GraphName, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered 4-tuple (subject, predicate, object, graph).
///
/// # Invariants
///
/// - `subject` is an IRI or blank node
/// - `predicate` is an IRI
///
/// These are documented contracts of the store boundary; the type itself
/// stores plain `Term`s so pattern matching stays uniform.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    /// Subject term (IRI or blank node)
    pub subject: Term,
    /// Predicate term (IRI)
    pub predicate: Term,
    /// Object term (any)
    pub object: Term,
    /// Graph component (default graph unless named)
    pub graph: GraphName,
}

impl Quad {
    /// Create a quad in the default graph.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: GraphName::Default,
        }
    }

    /// Create a quad in a named graph.
    pub fn in_graph(subject: Term, predicate: Term, object: Term, graph: GraphName) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// The canonical textual form used for content addressing.
    ///
    /// Fixed component order (subject, predicate, object, graph), N-Quads
    /// rendering per component, newline-terminated. Stable across process
    /// runs: two structurally equal quads always produce identical bytes.
    pub fn canonical_form(&self) -> String {
        match &self.graph {
            GraphName::Default => {
                format!("{} {} {} .\n", self.subject, self.predicate, self.object)
            }
            graph => format!(
                "{} {} {} {} .\n",
                self.subject, self.predicate, self.object, graph
            ),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_form().trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_quad() -> Quad {
        Quad::new(
            Term::iri("http://example.org/alice"),
            Term::iri("http://schema.org/name"),
            Term::literal("Alice"),
        )
    }

    #[test]
    fn test_structural_identity() {
        let q1 = name_quad();
        let q2 = name_quad();
        assert_eq!(q1, q2);

        let q3 = Quad::in_graph(
            q1.subject.clone(),
            q1.predicate.clone(),
            q1.object.clone(),
            GraphName::iri("http://example.org/g"),
        );
        assert_ne!(q1, q3);
    }

    #[test]
    fn test_canonical_form_default_graph() {
        assert_eq!(
            name_quad().canonical_form(),
            "<http://example.org/alice> <http://schema.org/name> \"Alice\" .\n"
        );
    }

    #[test]
    fn test_canonical_form_named_graph() {
        let q = Quad::in_graph(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::lang_string("chat", "fr"),
            GraphName::iri("http://example.org/g"),
        );
        assert_eq!(
            q.canonical_form(),
            "<http://example.org/s> <http://example.org/p> \"chat\"@fr <http://example.org/g> .\n"
        );
    }
}
