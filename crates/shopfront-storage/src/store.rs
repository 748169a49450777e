//! # Key/Value Store
//!
//! The durable storage seam used by the cart store.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStore Contract                               │
//! │                                                                         │
//! │  get(key)         → Ok(Some(value)) | Ok(None) when absent | Err       │
//! │  set(key, value)  → Ok(()) | Err            (overwrites, last wins)    │
//! │  delete(key)      → Ok(()) | Err            (absent key is not error)  │
//! │                                                                         │
//! │  Implementations:                                                      │
//! │  • Database     - SQLite file, survives restarts (pool.rs)             │
//! │  • MemoryStore  - HashMap, lives as long as the process                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorageResult;

/// Asynchronous string key/value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// In-memory store.
///
/// Used for `--ephemeral` runs and tests. Clones share the same map, so a
/// clone handed to a second `CartStore` simulates a process restart against
/// the same durable data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    kv: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(key.into(), value.into());
        MemoryStore {
            kv: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.kv.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.kv.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let kv = self.kv.read().await;
        Ok(kv.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut kv = self.kv.write().await;
        kv.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut kv = self.kv.write().await;
        kv.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("cart", "[]").await.unwrap();
        store.set("cart", "[1]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::with_entry("cart", "[]");
        let restarted = store.clone();
        store.delete("cart").await.unwrap();
        assert!(restarted.is_empty().await);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
