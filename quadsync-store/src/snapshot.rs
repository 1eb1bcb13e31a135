//! Snapshot reads for consumer catch-up
//!
//! A snapshot is the store's *entire current contents* under a filter,
//! read once when a consumer joins late. It is never used for
//! incremental delivery.
//!
//! Two equivalent paths exist:
//!
//! - **Declarative**: [`snapshot_query`] renders a SPARQL CONSTRUCT that
//!   backends with a query engine evaluate themselves
//!   ([`snapshot_declarative`]).
//! - **Procedural**: [`snapshot`] matches everything and applies the
//!   filter in-process, for backends that only offer pattern matching.
//!
//! Both must produce the same logical result set for the same filter and
//! store contents. (In SPARQL, `datatype()` of a plain literal is
//! `xsd:string`, which lines up with the procedural `ObjectKind::String`
//! test accepting plain literals.)

use crate::error::Result;
use crate::pattern::QuadPattern;
use crate::traits::{QuadStore, SparqlSource};
use quadsync_core::{ObjectKind, Quad, QuadFilter};

const QUERY_HEADER: &str = "\
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>

CONSTRUCT {
  ?subject ?predicate ?object
}
WHERE {
  {
    ?subject ?predicate ?object
  }
  UNION
  {
    GRAPH ?graph { ?subject ?predicate ?object }
  }";

/// Render the SPARQL CONSTRUCT query selecting all quads satisfying the
/// filter, across the default graph and every named graph.
pub fn snapshot_query(filter: &QuadFilter) -> String {
    let constraint = match filter.object_kind {
        ObjectKind::All => "isLiteral(?object)",
        ObjectKind::String => "isLiteral(?object) && datatype(?object) = xsd:string",
        ObjectKind::LangString => "isLiteral(?object) && datatype(?object) = rdf:langString",
    };
    format!("{QUERY_HEADER}\n  FILTER ({constraint})\n}}")
}

/// Procedural snapshot: match everything, filter in-process.
pub async fn snapshot<S>(store: &S, filter: &QuadFilter) -> Result<Vec<Quad>>
where
    S: QuadStore + ?Sized,
{
    let all = store.match_pattern(&QuadPattern::any()).await?;
    Ok(all
        .into_iter()
        .filter(|q| filter.matches(&q.object))
        .collect())
}

/// Declarative snapshot: let the backend evaluate the CONSTRUCT query.
pub async fn snapshot_declarative<S>(store: &S, filter: &QuadFilter) -> Result<Vec<Quad>>
where
    S: SparqlSource + ?Sized,
{
    store.query_construct(&snapshot_query(filter)).await
}
