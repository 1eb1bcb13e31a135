//! Procedural quad pattern matching
//!
//! The pattern form of `match(subject?, predicate?, object?, graph?)`:
//! `None` in a position matches anything, `Some(term)` matches by
//! structural equality. This is the lowest-common-denominator query
//! capability every backend offers.

use quadsync_core::{GraphName, Quad, Term};

/// A match pattern over the four quad positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadPattern {
    /// Subject constraint (`None` = any)
    pub subject: Option<Term>,
    /// Predicate constraint (`None` = any)
    pub predicate: Option<Term>,
    /// Object constraint (`None` = any)
    pub object: Option<Term>,
    /// Graph constraint (`None` = any)
    pub graph: Option<GraphName>,
}

impl QuadPattern {
    /// The wildcard pattern matching every quad.
    pub fn any() -> Self {
        Self::default()
    }

    /// Constrain the subject position.
    pub fn with_subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Constrain the predicate position.
    pub fn with_predicate(mut self, predicate: Term) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Constrain the object position.
    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    /// Constrain the graph position.
    pub fn with_graph(mut self, graph: GraphName) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Check whether a quad matches this pattern.
    pub fn matches(&self, quad: &Quad) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == quad.subject)
            && self
                .predicate
                .as_ref()
                .map_or(true, |p| *p == quad.predicate)
            && self.object.as_ref().map_or(true, |o| *o == quad.object)
            && self.graph.as_ref().map_or(true, |g| *g == quad.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Quad {
        Quad::in_graph(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::literal("o"),
            GraphName::iri("http://example.org/g"),
        )
    }

    #[test]
    fn test_any_matches_everything() {
        assert!(QuadPattern::any().matches(&quad()));
    }

    #[test]
    fn test_positional_constraints() {
        let q = quad();

        assert!(QuadPattern::any()
            .with_subject(Term::iri("http://example.org/s"))
            .matches(&q));
        assert!(!QuadPattern::any()
            .with_subject(Term::iri("http://example.org/other"))
            .matches(&q));

        assert!(QuadPattern::any()
            .with_object(Term::literal("o"))
            .with_graph(GraphName::iri("http://example.org/g"))
            .matches(&q));
        assert!(!QuadPattern::any()
            .with_graph(GraphName::Default)
            .matches(&q));
    }
}
