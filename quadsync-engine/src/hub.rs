//! Patch distribution engine
//!
//! `PatchHub` owns the set of active subscribers and fans every emitted
//! patch out to all of them, guaranteeing, for each subscriber
//! independently, strict emission-order delivery with non-overlapping
//! handler invocations. Independent subscribers advance concurrently — a
//! slow subscriber never blocks a fast one, it only delays
//! acknowledgment of the emissions it participates in.
//!
//! Each subscriber gets an unbounded FIFO channel and a dedicated worker
//! task that drains it one patch at a time; that pair is the explicit
//! form of the per-subscriber chain ("after the previous delivery
//! completes, invoke the handler with this patch"). The registry is
//! instance state on the hub, never process-global.

use async_trait::async_trait;
use quadsync_core::{Error, Patch, PatchEmitter, QuadFilter, Result, SubscriberFailure};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle identifying one registered subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// The numeric form, as carried in [`SubscriberFailure`].
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A subscriber's patch handler.
///
/// `handle` is invoked once per delivered patch; invocation N+1 for the
/// same subscriber does not begin until invocation N has returned. A
/// returned error is surfaced on the emitting call's completion and on
/// the hub's failure channel; it does not stop future deliveries to this
/// or any other subscriber, and the hub never retries.
#[async_trait]
pub trait PatchHandler: Send + Sync {
    /// Process one patch to completion.
    async fn handle(&self, patch: Patch) -> Result<()>;
}

#[async_trait]
impl<T: PatchHandler + ?Sized> PatchHandler for std::sync::Arc<T> {
    async fn handle(&self, patch: Patch) -> Result<()> {
        (**self).handle(patch).await
    }
}

/// Handler decorator that restricts patches to a [`QuadFilter`].
///
/// Quads whose object does not match are dropped from the patch before
/// it reaches the inner handler; a patch left empty is suppressed as a
/// no-op.
pub struct Filtered<H> {
    filter: QuadFilter,
    inner: H,
}

impl<H> Filtered<H> {
    /// Wrap a handler with a filter.
    pub fn new(filter: QuadFilter, inner: H) -> Self {
        Self { filter, inner }
    }
}

#[async_trait]
impl<H: PatchHandler> PatchHandler for Filtered<H> {
    async fn handle(&self, patch: Patch) -> Result<()> {
        let filtered = patch.filtered(&self.filter);
        if filtered.is_empty() {
            return Ok(());
        }
        self.inner.handle(filtered).await
    }
}

/// One queued delivery: the patch plus the acknowledgment slot the
/// emitter is waiting on.
struct Delivery {
    patch: Patch,
    ack: oneshot::Sender<std::result::Result<(), String>>,
}

struct SubscriberEntry {
    tx: mpsc::UnboundedSender<Delivery>,
    worker: JoinHandle<()>,
}

/// The distribution engine.
///
/// Must be driven from within a tokio runtime: `subscribe` spawns the
/// per-subscriber worker task.
pub struct PatchHub {
    /// Registered subscribers in registration order.
    ///
    /// Locked only for registration, unregistration, and fan-out
    /// snapshotting; delivery itself happens on the worker tasks.
    inner: Mutex<BTreeMap<SubscriberId, SubscriberEntry>>,
    next_id: AtomicU64,
    failures_tx: mpsc::UnboundedSender<SubscriberFailure>,
    failures_rx: Mutex<Option<mpsc::UnboundedReceiver<SubscriberFailure>>>,
}

impl Default for PatchHub {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        Self {
            inner: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
            failures_tx,
            failures_rx: Mutex::new(Some(failures_rx)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<SubscriberId, SubscriberEntry>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a subscriber; it observes only patches emitted after
    /// this call returns (history is the snapshot path's concern).
    pub fn subscribe(&self, handler: std::sync::Arc<dyn PatchHandler>) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, mut rx) = mpsc::unbounded_channel::<Delivery>();
        let failures = self.failures_tx.clone();

        let worker = tokio::spawn(async move {
            // Drains the channel strictly in order; keeps draining after
            // the sender is dropped so already-queued deliveries complete.
            while let Some(Delivery { patch, ack }) = rx.recv().await {
                let result = handler.handle(patch).await;
                if let Err(e) = &result {
                    warn!(subscriber = id.0, error = %e, "patch handler failed");
                    let _ = failures.send(SubscriberFailure {
                        subscriber: id.0,
                        message: e.to_string(),
                    });
                }
                let _ = ack.send(result.map_err(|e| e.to_string()));
            }
        });

        self.lock().insert(id, SubscriberEntry { tx, worker });
        debug!(subscriber = id.0, "subscriber registered");
        id
    }

    /// Remove a subscriber.
    ///
    /// No patch emitted after this call begins is delivered to it;
    /// deliveries already queued still complete. Resolves once the
    /// worker has drained, so the caller can release resources safely.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        let entry = self.lock().remove(&id);
        let Some(SubscriberEntry { tx, worker }) = entry else {
            return;
        };
        drop(tx);
        if worker.await.is_err() {
            warn!(subscriber = id.0, "subscriber worker panicked during drain");
        }
        debug!(subscriber = id.0, "subscriber removed");
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Take the failure channel (first caller only).
    ///
    /// Every handler failure is mirrored here so a supervisor can react
    /// even when the emitting side only logs the aggregate.
    pub fn take_failures(&self) -> Option<mpsc::UnboundedReceiver<SubscriberFailure>> {
        self.failures_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Emit one patch to every registered subscriber.
    ///
    /// Completes when all subscribers registered at emission time have
    /// finished processing this patch; their handler failures are
    /// aggregated into the returned error. The registry lock is held
    /// while enqueueing, so concurrent emitters cannot interleave the
    /// per-subscriber order.
    pub async fn emit(&self, patch: Patch) -> Result<()> {
        let acks: Vec<(SubscriberId, oneshot::Receiver<std::result::Result<(), String>>)> = {
            let inner = self.lock();
            inner
                .iter()
                .map(|(id, entry)| {
                    let (ack_tx, ack_rx) = oneshot::channel();
                    let _ = entry.tx.send(Delivery {
                        patch: patch.clone(),
                        ack: ack_tx,
                    });
                    (*id, ack_rx)
                })
                .collect()
        };

        let mut failures = Vec::new();
        for (id, ack) in acks {
            match ack.await {
                Ok(Ok(())) => {}
                Ok(Err(message)) => failures.push(SubscriberFailure {
                    subscriber: id.as_u64(),
                    message,
                }),
                // Worker gone without acknowledging (panic mid-handle).
                Err(_) => failures.push(SubscriberFailure {
                    subscriber: id.as_u64(),
                    message: "subscriber terminated before acknowledging".to_string(),
                }),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Delivery { failures })
        }
    }
}

#[async_trait]
impl PatchEmitter for PatchHub {
    async fn emit(&self, patch: Patch) -> Result<()> {
        PatchHub::emit(self, patch).await
    }
}
