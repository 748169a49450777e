//! # shopfront-storage: Durable Storage Adapter for Shopfront
//!
//! This crate provides the asynchronous key/value storage the cart store
//! reads once at startup and writes after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  CartStore (shopfront-cart)                                            │
//! │       │  get("cart") once at startup                                   │
//! │       │  set("cart", json) after each mutation                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                shopfront-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │   Database    │    │  Migrations  │  │   │
//! │  │   │  (trait)      │◄───│  (pool.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │  SqlitePool   │    │ 001_kv.sql   │  │   │
//! │  │   │ get/set/delete│◄───│  MemoryStore  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/storefront/shopfront.db                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` trait and the in-memory store
//! - [`pool`] - SQLite connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQL for the key/value table
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_storage::{Database, DbConfig, KeyValueStore};
//!
//! let db = Database::new(DbConfig::new("path/to/shopfront.db")).await?;
//! db.set("cart", "[]").await?;
//! assert_eq!(db.get("cart").await?.as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KeyValueRepository;
pub use store::{KeyValueStore, MemoryStore};
