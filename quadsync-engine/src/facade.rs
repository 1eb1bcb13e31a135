//! Synchronization facade
//!
//! The two operations consumers actually need:
//!
//! - [`sync_once`]: one-shot reconciliation — read the store's full
//!   current contents under a filter and apply them as a single
//!   all-insert patch;
//! - [`sync_and_follow`]: ongoing synchronization — subscribe to the
//!   hub (filtered, batched), then run the snapshot catch-up.
//!
//! `sync_and_follow` subscribes *before* snapshotting, so any mutation
//! that happens after the snapshot read begins is delivered as a patch:
//! nothing is both absent from the snapshot and undelivered. A mutation
//! may appear in both — content addressing makes the overlap idempotent
//! at the sink.

use crate::batch::{BatchOptions, Batcher};
use crate::error::Result;
use crate::hub::{Filtered, PatchHub};
use crate::subscription::Subscription;
use quadsync_core::{Patch, PatchSink, QuadFilter};
use quadsync_store::{snapshot, QuadStore};
use std::sync::Arc;
use tracing::debug;

/// One-shot synchronization: snapshot the store and apply it to the
/// sink as a single all-insert patch. An empty snapshot is suppressed.
pub async fn sync_once<S, K>(store: &S, sink: &K, filter: &QuadFilter) -> Result<()>
where
    S: QuadStore + ?Sized,
    K: PatchSink + ?Sized,
{
    let quads = snapshot(store, filter).await?;
    debug!(quads = quads.len(), "snapshot sync");
    if quads.is_empty() {
        return Ok(());
    }
    sink.apply(&[Patch::insert_all(quads)]).await?;
    Ok(())
}

/// Ongoing synchronization: register a filtered, batched subscription
/// on the hub, then catch the sink up from a snapshot.
///
/// The returned [`Subscription`] must be kept alive for delivery to
/// continue and unsubscribed to flush the final batch.
pub async fn sync_and_follow<S, K>(
    hub: &Arc<PatchHub>,
    store: &S,
    sink: K,
    filter: QuadFilter,
    options: BatchOptions,
) -> Result<Subscription<K>>
where
    S: QuadStore + ?Sized,
    K: PatchSink + 'static,
{
    let batcher = Batcher::new(sink, options);
    let id = hub.subscribe(Arc::new(Filtered::new(filter, batcher.clone())));

    // Subscription is established before the snapshot read begins.
    let catch_up = async {
        let quads = snapshot(store, &filter).await?;
        debug!(quads = quads.len(), subscriber = id.as_u64(), "catch-up snapshot");
        if !quads.is_empty() {
            batcher.apply_direct(&[Patch::insert_all(quads)]).await?;
        }
        Ok::<(), crate::error::EngineError>(())
    };

    match catch_up.await {
        Ok(()) => Ok(Subscription::new(hub.clone(), id, batcher)),
        Err(e) => {
            // Failed before the subscription was handed out; tear it down.
            hub.unsubscribe(id).await;
            Err(e)
        }
    }
}
