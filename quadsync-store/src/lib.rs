//! # quadsync store boundary
//!
//! The seam between the sync core and a primary quad store:
//!
//! - [`QuadStore`]: the capability surface consumed from any backend
//! - [`MemoryStore`]: the in-memory reference backend
//! - [`PatchedStore`]: the interception decorator that turns every
//!   mutating call into exactly one emitted [`quadsync_core::Patch`]
//! - [`snapshot`] / [`snapshot_query`]: full-contents reads for late
//!   consumer catch-up, procedural and declarative forms
//!
//! Production backends adapt an existing triple-store engine by
//! implementing `QuadStore` (and `SparqlSource` where the engine offers
//! declarative querying) — interception and snapshot logic are written
//! once against the traits, never per backend.

pub mod error;
pub mod intercept;
pub mod memory;
pub mod pattern;
pub mod snapshot;
pub mod traits;

pub use error::{Result, StoreError};
pub use intercept::{PatchedStore, Update};
pub use memory::MemoryStore;
pub use pattern::QuadPattern;
pub use snapshot::{snapshot, snapshot_declarative, snapshot_query};
pub use traits::{QuadStore, SparqlSource};
