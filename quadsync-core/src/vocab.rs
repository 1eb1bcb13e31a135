//! Well-known vocabulary IRIs used by the patch core.
//!
//! Only the handful of datatype IRIs the filter logic needs. Full
//! vocabularies are the primary store's concern, not ours.

/// XSD namespace constants.
pub mod xsd {
    /// xsd:string — the default datatype for plain literals.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

/// RDF namespace constants.
pub mod rdf {
    /// rdf:langString — the datatype of language-tagged literals.
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}
