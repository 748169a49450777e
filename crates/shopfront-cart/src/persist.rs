//! # Cart Writer
//!
//! Background task that performs cart writes one at a time, in the order
//! they were queued.
//!
//! ## Queue Semantics
//! ```text
//! CartStore ──Write(json)──► ┌──────────────┐
//! CartStore ──Write(json)──► │  unbounded   │ ──► storage.set(key, json)  (1st)
//! flush()   ──Flush(ack)───► │  mpsc queue  │ ──► storage.set(key, json)  (2nd)
//! close()   ──Shutdown(ack)► └──────────────┘ ──► ack flush, then stop
//! ```
//!
//! Writes are never coalesced or retried. A failed write is logged and the
//! next command proceeds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use shopfront_storage::KeyValueStore;

/// Commands for the writer task.
#[derive(Debug)]
enum PersistCommand {
    /// Store this cart payload.
    Write(String),
    /// Acknowledge once every earlier command has been handled.
    Flush(oneshot::Sender<()>),
    /// Acknowledge, then stop.
    Shutdown(oneshot::Sender<()>),
}

/// Counters describing what the writer has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistStats {
    /// Writes handed to storage.
    pub attempted: u64,
    /// Writes storage rejected.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct WriterCounters {
    attempted: AtomicU64,
    failed: AtomicU64,
}

/// Handle for queueing work on the writer task.
#[derive(Debug, Clone)]
pub(crate) struct WriterHandle {
    cmd_tx: mpsc::UnboundedSender<PersistCommand>,
    counters: Arc<WriterCounters>,
}

impl WriterHandle {
    /// Queues a write. Returns false when the writer has stopped.
    pub(crate) fn write(&self, payload: String) -> bool {
        self.cmd_tx.send(PersistCommand::Write(payload)).is_ok()
    }

    /// Waits until every write queued before this call has been attempted.
    pub(crate) async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.cmd_tx.send(PersistCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Drains the queue and stops the writer.
    pub(crate) async fn shutdown(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.cmd_tx.send(PersistCommand::Shutdown(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    pub(crate) fn stats(&self) -> PersistStats {
        PersistStats {
            attempted: self.counters.attempted.load(Ordering::SeqCst),
            failed: self.counters.failed.load(Ordering::SeqCst),
        }
    }
}

/// Single consumer of the write queue.
pub(crate) struct CartWriter {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    counters: Arc<WriterCounters>,
}

impl CartWriter {
    /// Spawns the writer task and returns its handle.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn spawn(storage: Arc<dyn KeyValueStore>, key: String) -> (WriterHandle, JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let counters = Arc::new(WriterCounters::default());

        let writer = CartWriter {
            storage,
            key,
            counters: Arc::clone(&counters),
        };
        let task = tokio::spawn(writer.run(cmd_rx));

        (WriterHandle { cmd_tx, counters }, task)
    }

    async fn run(self, mut cmd_rx: mpsc::UnboundedReceiver<PersistCommand>) {
        info!(key = %self.key, "Cart writer started");

        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                PersistCommand::Write(payload) => self.write(&payload).await,
                PersistCommand::Flush(ack) => {
                    let _ = ack.send(());
                }
                PersistCommand::Shutdown(ack) => {
                    let _ = ack.send(());
                    break;
                }
            }
        }

        info!(key = %self.key, "Cart writer stopped");
    }

    async fn write(&self, payload: &str) {
        self.counters.attempted.fetch_add(1, Ordering::SeqCst);

        match self.storage.set(&self.key, payload).await {
            Ok(()) => debug!(key = %self.key, bytes = payload.len(), "Cart persisted"),
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::SeqCst);
                error!(key = %self.key, error = %e, "Failed to persist cart; write dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_storage::MemoryStore;

    #[tokio::test]
    async fn test_writes_land_in_order() {
        let storage = MemoryStore::new();
        let (handle, task) = CartWriter::spawn(Arc::new(storage.clone()), "cart".into());

        assert!(handle.write("[1]".into()));
        assert!(handle.write("[2]".into()));
        handle.flush().await;

        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(handle.stats(), PersistStats { attempted: 2, failed: 0 });

        handle.shutdown().await;
        task.await.unwrap();
        assert!(!handle.write("[3]".into()));
    }

    #[tokio::test]
    async fn test_flush_after_shutdown_returns() {
        let (handle, task) = CartWriter::spawn(Arc::new(MemoryStore::new()), "cart".into());
        handle.shutdown().await;
        task.await.unwrap();

        handle.flush().await;
        handle.shutdown().await;
    }
}
