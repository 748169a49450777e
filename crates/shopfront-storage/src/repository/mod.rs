//! # Repository Module
//!
//! SQL access for the storage database.
//!
//! ## Repository Pattern
//! ```text
//! Database (pool.rs)
//!      │
//!      │  db.kv().get("cart")
//!      ▼
//! KeyValueRepository
//! ├── get(&self, key)
//! ├── set(&self, key, value)
//! ├── delete(&self, key)
//! └── keys(&self)
//!      │
//!      │  SQL Query
//!      ▼
//! SQLite kv_store table
//! ```
//!
//! ## Available Repositories
//!
//! - [`KeyValueRepository`](kv::KeyValueRepository) - String key/value rows

pub mod kv;
