//! # shopfront-cart: Cart Store
//!
//! Owns the in-memory cart for the lifetime of the app and mirrors it into a
//! [`KeyValueStore`](shopfront_storage::KeyValueStore).
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartStore Lifecycle                              │
//! │                                                                         │
//! │  CartStore::open(storage, config)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Loading ── storage.get("cart") in flight                              │
//! │       │     mutations apply in memory and are recorded                 │
//! │       ▼                                                                 │
//! │  Ready ──── loaded cart + recorded mutations replayed in order         │
//! │       │     every mutation queues the full cart as JSON                │
//! │       ▼                                                                 │
//! │  close() ── pending writes land, writer task stops                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let storage: Arc<dyn KeyValueStore> = Arc::new(Database::new(db_config).await?);
//! let cart = CartStore::open(storage, CartStoreConfig::default());
//! cart.ready().await;
//!
//! cart.add_to_cart(product);
//! println!("{}", cart.total_price());
//!
//! cart.close().await;
//! ```

pub mod config;
mod persist;
pub mod store;

pub use config::CartStoreConfig;
pub use persist::PersistStats;
pub use store::{CartStore, StorePhase};
