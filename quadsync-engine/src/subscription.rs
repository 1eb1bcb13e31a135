//! Live subscription handle
//!
//! Returned by the facade's keep-in-sync operation. Unsubscribing is
//! synchronous-intent, asynchronous-complete: future delivery stops as
//! soon as the hub entry is removed, and the call resolves only once
//! in-flight deliveries and the final batch flush have finished, so the
//! caller can release the sink afterwards.

use crate::batch::Batcher;
use crate::hub::{PatchHub, SubscriberId};
use quadsync_core::{PatchSink, Result};
use std::sync::Arc;

/// An active keep-in-sync subscription.
pub struct Subscription<K> {
    hub: Arc<PatchHub>,
    id: SubscriberId,
    batcher: Batcher<K>,
}

impl<K> Subscription<K>
where
    K: PatchSink + 'static,
{
    pub(crate) fn new(hub: Arc<PatchHub>, id: SubscriberId, batcher: Batcher<K>) -> Self {
        Self { hub, id, batcher }
    }

    /// The hub-side identity of this subscription.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Cancel the subscription.
    ///
    /// Stops future delivery immediately, waits for in-flight deliveries
    /// to complete, then flushes any partial batch. Errors from the
    /// final flush (including a deferred timeout-flush failure) are
    /// returned here rather than lost.
    pub async fn unsubscribe(self) -> Result<()> {
        self.hub.unsubscribe(self.id).await;
        self.batcher.close().await
    }
}
