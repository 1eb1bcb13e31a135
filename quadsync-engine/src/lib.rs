//! # quadsync engine
//!
//! The change-propagation half of quadsync:
//!
//! - [`PatchHub`]: fan-out with strict per-subscriber ordering and
//!   independent progress across subscribers
//! - [`Batcher`] / [`BatchOptions`]: size- and timeout-based flushing
//! - [`SearchPatchSink`] / [`SearchIndex`]: the downstream index
//!   boundary, keyed by content address for idempotent upsert/delete
//! - [`sync_once`] / [`sync_and_follow`]: the consumer-facing facade
//!
//! # Example
//!
//! ```ignore
//! use quadsync_engine::{sync_and_follow, BatchOptions, PatchHub, SearchPatchSink};
//! use quadsync_store::{MemoryStore, PatchedStore};
//! use quadsync_core::QuadFilter;
//! use std::sync::Arc;
//!
//! let hub = Arc::new(PatchHub::new());
//! let store = PatchedStore::new(MemoryStore::new(), hub.clone());
//! let sink = SearchPatchSink::new(my_index);
//!
//! let subscription = sync_and_follow(
//!     &hub, store.store(), sink, QuadFilter::default(), BatchOptions::default(),
//! ).await?;
//! // ... mutate `store`; the index follows ...
//! subscription.unsubscribe().await?;
//! ```

pub mod batch;
pub mod error;
pub mod facade;
pub mod hub;
pub mod sink;
pub mod subscription;

pub use batch::{BatchOptions, Batcher};
pub use error::{EngineError, Result};
pub use facade::{sync_and_follow, sync_once};
pub use hub::{Filtered, PatchHandler, PatchHub, SubscriberId};
pub use sink::{SearchDocument, SearchHit, SearchIndex, SearchPatchSink};
pub use subscription::Subscription;
