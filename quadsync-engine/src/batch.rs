//! Patch batching
//!
//! `Batcher` converts a stream of individually-delivered patches into
//! coarser flush units so the sink amortizes per-application overhead.
//! Accumulated patches are applied as one slice in arrival order; the
//! per-patch delete-before-insert contract is the sink's to honor and is
//! unaffected by concatenation.
//!
//! Flush triggers:
//! - size: the pending batch reaches `batch_size` (default 1, i.e. no
//!   batching);
//! - timeout: a partially-filled batch older than `batch_timeout`
//!   (default 0, i.e. no time-based flush);
//! - close: shutdown flushes whatever is pending — the batcher never
//!   drops a patch.
//!
//! A size-triggered flush cancels the pending timer; the timer is
//! rescheduled when the next batch starts accumulating. A timeout flush
//! runs off the delivery path; its failure is held and surfaced on the
//! next delivery or on close, so it cannot go unnoticed.

use crate::hub::PatchHandler;
use async_trait::async_trait;
use quadsync_core::{Error, Patch, PatchSink, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Batching configuration.
#[derive(Clone, Copy, Debug)]
pub struct BatchOptions {
    /// Flush once this many patches have accumulated. 1 = no batching.
    pub batch_size: usize,
    /// Flush a partial batch after this long. Zero = size-only flushing.
    pub batch_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 1,
            batch_timeout: Duration::ZERO,
        }
    }
}

impl BatchOptions {
    /// Size-only batching.
    pub fn size(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Size plus timeout batching.
    pub fn size_and_timeout(batch_size: usize, batch_timeout: Duration) -> Self {
        Self {
            batch_size,
            batch_timeout,
        }
    }
}

struct BatchState {
    pending: Vec<Patch>,
    timer: Option<JoinHandle<()>>,
    /// Failure from a timeout flush, held until it can be surfaced.
    deferred_error: Option<String>,
}

struct Shared<K> {
    sink: K,
    state: Mutex<BatchState>,
}

/// Accumulates patches for a sink and flushes them by size or timeout.
///
/// Cheap to clone; clones share the pending batch and the sink. The
/// state lock is held across sink application, so flushes from the
/// delivery path, the timer, and `close` never overlap.
pub struct Batcher<K> {
    shared: Arc<Shared<K>>,
    options: BatchOptions,
}

impl<K> Clone for Batcher<K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            options: self.options,
        }
    }
}

impl<K> Batcher<K>
where
    K: PatchSink + 'static,
{
    /// Wrap a sink with batching.
    pub fn new(sink: K, options: BatchOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                sink,
                state: Mutex::new(BatchState {
                    pending: Vec::new(),
                    timer: None,
                    deferred_error: None,
                }),
            }),
            options,
        }
    }

    /// Accept one patch from the subscription.
    pub async fn push(&self, patch: Patch) -> Result<()> {
        let mut state = self.shared.state.lock().await;

        if let Some(message) = state.deferred_error.take() {
            return Err(Error::sink(message));
        }

        state.pending.push(patch);

        if state.pending.len() >= self.options.batch_size {
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            let batch = std::mem::take(&mut state.pending);
            debug!(patches = batch.len(), "size flush");
            self.shared.sink.apply(&batch).await?;
        } else if state.pending.len() == 1 && !self.options.batch_timeout.is_zero() {
            // Timer is armed when the batch starts, not reset per patch, so
            // a steady trickle cannot postpone the flush indefinitely.
            self.schedule_timer(&mut state);
        }

        Ok(())
    }

    /// Apply patches through the sink immediately, serialized with any
    /// flush in progress. Used for snapshot catch-up so it cannot
    /// interleave with a live batch application.
    pub(crate) async fn apply_direct(&self, patches: &[Patch]) -> Result<()> {
        let _state = self.shared.state.lock().await;
        self.shared.sink.apply(patches).await
    }

    /// Flush any partial batch and surface any deferred timer failure.
    ///
    /// Called on unsubscribe; after this, the batcher holds nothing.
    pub async fn close(&self) -> Result<()> {
        let mut state = self.shared.state.lock().await;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        let deferred = state.deferred_error.take();
        let batch = std::mem::take(&mut state.pending);
        if !batch.is_empty() {
            debug!(patches = batch.len(), "close flush");
            self.shared.sink.apply(&batch).await?;
        }
        match deferred {
            Some(message) => Err(Error::sink(message)),
            None => Ok(()),
        }
    }

    /// (Re)arm the timeout flush for the currently accumulating batch.
    fn schedule_timer(&self, state: &mut BatchState) {
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        let shared = Arc::clone(&self.shared);
        let timeout = self.options.batch_timeout;
        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut state = shared.state.lock().await;
            state.timer = None;
            let batch = std::mem::take(&mut state.pending);
            if batch.is_empty() {
                return;
            }
            debug!(patches = batch.len(), "timeout flush");
            if let Err(e) = shared.sink.apply(&batch).await {
                warn!(error = %e, "timeout flush failed");
                state.deferred_error = Some(e.to_string());
            }
        }));
    }
}

#[async_trait]
impl<K> PatchHandler for Batcher<K>
where
    K: PatchSink + 'static,
{
    async fn handle(&self, patch: Patch) -> Result<()> {
        self.push(patch).await
    }
}
