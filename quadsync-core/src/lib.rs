//! # quadsync core
//!
//! Shared vocabulary for the quadsync patch synchronization core:
//!
//! - [`Term`], [`GraphName`], [`Quad`]: the immutable fact model
//! - [`Patch`]: one atomic insert/delete delta
//! - [`QuadFilter`]: indexable-literal selection
//! - [`QuadId`]: content address for idempotent downstream upsert/delete
//! - [`PatchEmitter`] / [`PatchSink`]: the seams between producer,
//!   distribution engine, and consumers
//!
//! ## Design Principles
//!
//! 1. **Immutable values**: quads and patches are never mutated after
//!    construction and carry no history.
//! 2. **Structural identity**: equality is term-by-term; content addresses
//!    exist only for downstream stores.
//! 3. **No ambient state**: every function here is pure; registries and
//!    queues live in `quadsync-engine` as instance state.

pub mod address;
pub mod error;
pub mod filter;
pub mod patch;
pub mod quad;
pub mod term;
pub mod traits;
pub mod vocab;

pub use address::QuadId;
pub use error::{Error, Result, SubscriberFailure};
pub use filter::{ObjectKind, QuadFilter};
pub use patch::Patch;
pub use quad::Quad;
pub use term::{BlankId, GraphName, Term};
pub use traits::{PatchEmitter, PatchSink};
