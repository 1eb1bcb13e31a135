//! Content addressing for quads
//!
//! `QuadId` derives a stable identifier from a quad's content so that
//! downstream stores can treat "delete quad X" as "delete document id(X)"
//! and "insert quad X" as "upsert document id(X)", making repeated
//! delivery of the same patch idempotent at the sink.
//!
//! ## Algorithm
//!
//! Canonical N-Quads form ([`Quad::canonical_form`]) hashed with SHA-256,
//! encoded base64 URL-safe without padding. Pure function, no shared state;
//! structurally equal quads always map to the same id.
//!
//! `QuadId` is *only* downstream identity. Quad equality inside the core
//! is always structural, never id-based.

use crate::quad::Quad;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Stable content-derived identifier for a quad.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuadId(Arc<str>);

impl QuadId {
    /// Derive the content address of a quad.
    pub fn of(quad: &Quad) -> Self {
        let digest = Sha256::digest(quad.canonical_form().as_bytes());
        Self(Arc::from(URL_SAFE_NO_PAD.encode(digest)))
    }

    /// The encoded identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for QuadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuadId({})", self.0)
    }
}
