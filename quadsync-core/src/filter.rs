//! Indexable-literal selection
//!
//! A `QuadFilter` decides which object terms count as indexable text.
//! Non-literal objects never match. A filter applied to a non-literal is
//! resolved locally by treating the quad as non-matching, never by erroring.

use crate::term::Term;
use crate::vocab;
use serde::{Deserialize, Serialize};

/// Which literal kinds count as indexable text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// Literals with no language tag and no datatype (or `xsd:string`).
    String,
    /// Literals carrying a language tag.
    LangString,
    /// Every literal regardless of datatype.
    #[default]
    All,
}

/// Selection criterion for snapshot reads and live-patch filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuadFilter {
    /// Literal kind selection; defaults to `All`.
    pub object_kind: ObjectKind,
}

impl QuadFilter {
    /// Create a filter for the given object kind.
    pub fn new(object_kind: ObjectKind) -> Self {
        Self { object_kind }
    }

    /// Check whether an object term counts as indexable under this filter.
    pub fn matches(&self, object: &Term) -> bool {
        let Term::Literal {
            language, datatype, ..
        } = object
        else {
            return false;
        };

        match self.object_kind {
            ObjectKind::All => true,
            ObjectKind::String => {
                language.is_none()
                    && datatype
                        .as_deref()
                        .map_or(true, |dt| dt == vocab::xsd::STRING)
            }
            ObjectKind::LangString => language.is_some(),
        }
    }
}
