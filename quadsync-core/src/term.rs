//! RDF term and graph-name types
//!
//! Terms are the building blocks of quads. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with stable identifier)
//! - A literal (lexical value + optional language tag + optional datatype)
//!
//! Equality is structural and field-by-field: a literal with no datatype
//! and a literal explicitly typed `xsd:string` are *different* terms here,
//! even though RDF treats them as the same literal. Filters account for
//! that equivalence; term equality does not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a store but have no global meaning.
/// The label does NOT include the `_:` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label (without the `_:` prefix).
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an expanded IRI, never a prefixed form.
/// - The subject position of a quad can only be `Term::Iri` or
///   `Term::BlankNode`; the predicate position only `Term::Iri`. These are
///   documented invariants, enforced by constructors at the store boundary
///   rather than by panics here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://schema.org/name")
    Iri(Arc<str>),

    /// Blank node with stable identifier
    BlankNode(BlankId),

    /// Literal with optional language tag and optional datatype IRI
    Literal {
        /// The lexical value
        value: Arc<str>,
        /// Language tag (compared with plain equality)
        language: Option<Arc<str>>,
        /// Datatype IRI; `None` means a plain literal
        datatype: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string.
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term.
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain literal (no language tag, no datatype).
    pub fn literal(value: impl AsRef<str>) -> Self {
        Term::Literal {
            value: Arc::from(value.as_ref()),
            language: None,
            datatype: None,
        }
    }

    /// Create a language-tagged literal.
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            value: Arc::from(value.as_ref()),
            language: Some(Arc::from(lang.as_ref())),
            datatype: None,
        }
    }

    /// Create a typed literal with an explicit datatype IRI.
    pub fn typed(value: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Term::Literal {
            value: Arc::from(value.as_ref()),
            language: None,
            datatype: Some(Arc::from(datatype.as_ref())),
        }
    }

    /// Check if this is an IRI term.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Try to get as IRI string.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID.
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get literal components: (value, language, datatype).
    pub fn as_literal(&self) -> Option<(&str, Option<&str>, Option<&str>)> {
        match self {
            Term::Literal {
                value,
                language,
                datatype,
            } => Some((value, language.as_deref(), datatype.as_deref())),
            _ => None,
        }
    }

    /// Check whether this term may appear in subject position.
    pub fn is_subject(&self) -> bool {
        matches!(self, Term::Iri(_) | Term::BlankNode(_))
    }
}

/// Escape a literal value for N-Quads output.
fn escape_literal(value: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in value.chars() {
        match c {
            '\\' => write!(f, "\\\\")?,
            '"' => write!(f, "\\\"")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl fmt::Display for Term {
    /// N-Quads rendering.
    ///
    /// Literals serialize every field that is present: a plain literal and
    /// one explicitly typed `xsd:string` render differently, matching the
    /// structural equality contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "{id}"),
            Term::Literal {
                value,
                language,
                datatype,
            } => {
                write!(f, "\"")?;
                escape_literal(value, f)?;
                write!(f, "\"")?;
                if let Some(lang) = language {
                    write!(f, "@{lang}")?;
                }
                if let Some(dt) = datatype {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}

/// The graph component of a quad
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphName {
    /// The default graph
    #[default]
    Default,
    /// A named graph identified by IRI
    Iri(Arc<str>),
    /// A named graph identified by blank node
    Blank(BlankId),
}

impl GraphName {
    /// Create a named-graph name from an expanded IRI.
    pub fn iri(iri: impl AsRef<str>) -> Self {
        GraphName::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a named-graph name from a blank node label.
    pub fn blank(label: impl AsRef<str>) -> Self {
        GraphName::Blank(BlankId::new(label))
    }

    /// Check if this is the default graph.
    pub fn is_default(&self) -> bool {
        matches!(self, GraphName::Default)
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::Default => Ok(()),
            GraphName::Iri(iri) => write!(f, "<{iri}>"),
            GraphName::Blank(id) => write!(f, "{id}"),
        }
    }
}
