//! # Cart Store
//!
//! The shared cart every screen reads and mutates.
//!
//! ## Threading Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore (cheap to clone)                           │
//! │                                                                         │
//! │  Arc<Inner>                                                             │
//! │   ├── Mutex<State>  { cart, phase, recorded ops }   ← every mutation   │
//! │   ├── watch<Vec<CartLineItem>>                      ← subscribe()      │
//! │   ├── watch<StorePhase>                             ← ready()          │
//! │   └── WriterHandle ──► writer task ──► KeyValueStore::set              │
//! │                                                                         │
//! │  A write is queued while the state lock is held, so the write queue    │
//! │  order always equals the mutation order.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations never fail and never wait on storage. Load and write failures
//! are logged and swallowed.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use shopfront_core::{Cart, CartLineItem, CartOp, CartTotals, Money, Product, ProductId};
use shopfront_storage::KeyValueStore;

use crate::config::CartStoreConfig;
use crate::persist::{CartWriter, PersistStats, WriterHandle};

// =============================================================================
// Store Phase
// =============================================================================

/// Where the store is in its startup sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorePhase {
    /// Not yet opened.
    #[default]
    Uninitialized,
    /// The saved cart is being read. Mutations apply in memory and are
    /// recorded, but nothing is written.
    Loading,
    /// The saved cart has been merged in. Every mutation is persisted.
    Ready,
}

impl fmt::Display for StorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorePhase::Uninitialized => "uninitialized",
            StorePhase::Loading => "loading",
            StorePhase::Ready => "ready",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

#[derive(Debug, Default)]
struct State {
    cart: Cart,
    phase: StorePhase,
    /// Mutations made while Loading, in call order.
    recorded: Vec<CartOp>,
}

struct Inner {
    config: CartStoreConfig,
    state: Mutex<State>,
    snapshot_tx: watch::Sender<Vec<CartLineItem>>,
    phase_tx: watch::Sender<StorePhase>,
    writer: WriterHandle,
    writer_task: Mutex<Option<JoinHandle<()>>>,
}

/// Shared, observable shopping cart backed by a [`KeyValueStore`].
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock_state();
        f.debug_struct("CartStore")
            .field("key", &self.inner.config.storage_key)
            .field("phase", &state.phase)
            .field("items", &state.cart.len())
            .finish()
    }
}

impl CartStore {
    /// Opens the store and starts reading the saved cart in the background.
    ///
    /// Returns immediately in the `Loading` phase; use [`ready`](Self::ready)
    /// to wait for the saved cart. Must be called from within a Tokio runtime.
    pub fn open(storage: Arc<dyn KeyValueStore>, config: CartStoreConfig) -> Self {
        let (writer, writer_task) = CartWriter::spawn(Arc::clone(&storage), config.storage_key.clone());
        let (snapshot_tx, _) = watch::channel(Vec::new());
        let (phase_tx, _) = watch::channel(StorePhase::Loading);

        let inner = Arc::new(Inner {
            config,
            state: Mutex::new(State {
                phase: StorePhase::Loading,
                ..State::default()
            }),
            snapshot_tx,
            phase_tx,
            writer,
            writer_task: Mutex::new(Some(writer_task)),
        });

        info!(key = %inner.config.storage_key, "Opening cart store");
        tokio::spawn(load_saved_cart(Arc::clone(&inner), storage));

        CartStore { inner }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`. An existing line gains one unit; otherwise
    /// a new line is appended.
    pub fn add_to_cart(&self, product: Product) {
        self.mutate(CartOp::Add(product));
    }

    /// Removes the line for `product_id`, if present.
    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.mutate(CartOp::Remove(product_id));
    }

    /// Adds one unit to the line for `product_id`, if present.
    pub fn increase_quantity(&self, product_id: ProductId) {
        self.mutate(CartOp::Increase(product_id));
    }

    /// Removes one unit from the line for `product_id` unless it would drop
    /// below 1. Never removes the line.
    pub fn decrease_quantity(&self, product_id: ProductId) {
        self.mutate(CartOp::Decrease(product_id));
    }

    /// Empties the cart.
    pub fn clear_cart(&self) {
        self.mutate(CartOp::Clear);
    }

    /// Empties the cart and returns what it held, under one lock.
    ///
    /// No mutation from another handle can land between the copy and the
    /// clear. Persists like `clear_cart`.
    pub fn take_all(&self) -> Cart {
        let mut state = self.inner.lock_state();
        let taken = state.cart.clone();
        self.apply_locked(&mut state, CartOp::Clear);
        taken
    }

    fn mutate(&self, op: CartOp) {
        let mut state = self.inner.lock_state();
        self.apply_locked(&mut state, op);
    }

    fn apply_locked(&self, state: &mut State, op: CartOp) {
        let inner = &self.inner;
        let changed = state.cart.apply(&op);
        debug!(
            op = op.name(),
            product_id = op.product_id().map(|id| id.get()),
            changed,
            phase = %state.phase,
            "Cart mutation"
        );

        if changed {
            inner.publish(&state.cart);
        }

        let phase = state.phase;
        match phase {
            StorePhase::Ready => inner.persist(&state.cart),
            StorePhase::Uninitialized | StorePhase::Loading => state.recorded.push(op),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Sum of price × quantity over every line.
    pub fn total_price(&self) -> Money {
        self.inner.lock_state().cart.total_price()
    }

    /// Snapshot of the current lines, in insertion order.
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.inner.lock_state().cart.items().to_vec()
    }

    /// Copy of the whole cart, taken under one lock.
    pub fn snapshot(&self) -> Cart {
        self.inner.lock_state().cart.clone()
    }

    /// Counts and money totals for the current cart.
    pub fn totals(&self) -> CartTotals {
        self.inner.lock_state().cart.totals()
    }

    /// Receives a new snapshot after every change to the cart.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLineItem>> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn phase(&self) -> StorePhase {
        self.inner.lock_state().phase
    }

    /// Storage key this store reads and writes.
    pub fn storage_key(&self) -> &str {
        &self.inner.config.storage_key
    }

    /// Counters from the writer task.
    pub fn persist_stats(&self) -> PersistStats {
        self.inner.writer.stats()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Waits until the saved cart has been loaded and merged.
    pub async fn ready(&self) {
        let mut phase_rx = self.inner.phase_tx.subscribe();
        let _ = phase_rx.wait_for(|phase| *phase == StorePhase::Ready).await;
    }

    /// Waits until every write queued so far has been attempted.
    pub async fn flush(&self) {
        self.inner.writer.flush().await;
    }

    /// Waits for the load to finish, lets queued writes land, then stops the
    /// writer. Later mutations still apply in memory but are not persisted.
    pub async fn close(&self) {
        self.ready().await;
        self.inner.writer.shutdown().await;

        let task = self
            .inner
            .writer_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!(error = %e, "Cart writer task failed");
            }
        }

        info!(key = %self.inner.config.storage_key, "Cart store closed");
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, cart: &Cart) {
        self.snapshot_tx.send_replace(cart.items().to_vec());
    }

    /// Queues the full cart for writing.
    fn persist(&self, cart: &Cart) {
        match cart.to_json() {
            Ok(payload) => {
                if !self.writer.write(payload) {
                    warn!(key = %self.config.storage_key, "Cart writer stopped; change not persisted");
                }
            }
            Err(e) => error!(error = %e, "Failed to serialize cart"),
        }
    }

    /// Moves Loading -> Ready exactly once.
    fn finish_loading(&self, loaded: Cart) {
        let mut state = self.lock_state();
        if state.phase == StorePhase::Ready {
            return;
        }

        let recorded = std::mem::take(&mut state.recorded);
        let mut cart = loaded;
        for op in &recorded {
            cart.apply(op);
        }

        state.cart = cart;
        state.phase = StorePhase::Ready;

        if !recorded.is_empty() {
            self.persist(&state.cart);
        }
        self.publish(&state.cart);
        self.phase_tx.send_replace(StorePhase::Ready);

        info!(
            items = state.cart.len(),
            replayed = recorded.len(),
            "Cart store ready"
        );
    }
}

/// Reads the saved cart once. Absent, unreadable, or invalid data all give an
/// empty cart.
async fn load_saved_cart(inner: Arc<Inner>, storage: Arc<dyn KeyValueStore>) {
    let key = inner.config.storage_key.clone();

    let loaded = match storage.get(&key).await {
        Ok(Some(payload)) => match Cart::from_json(&payload) {
            Ok(cart) => {
                debug!(key = %key, items = cart.len(), "Loaded saved cart");
                cart
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Saved cart is invalid; starting empty");
                Cart::new()
            }
        },
        Ok(None) => {
            debug!(key = %key, "No saved cart");
            Cart::new()
        }
        Err(e) => {
            error!(key = %key, error = %e, "Failed to load saved cart; starting empty");
            Cart::new()
        }
    };

    inner.finish_loading(loaded);
}

// =============================================================================
// Unit Tests
// =============================================================================
