//! # State Module
//!
//! Everything a command needs, opened once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppState                                             │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │  AppConfig   │  │  ProductSource   │  │  CartStore               │  │
//! │  │  (read-only) │  │  (HTTP catalog)  │  │  (shared cart + writer)  │  │
//! │  └──────────────┘  └──────────────────┘  └────────────┬─────────────┘  │
//! │                                                       │                 │
//! │                                          Database (SQLite) or          │
//! │                                          MemoryStore (in_memory)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{AppConfig, CatalogSettings, ConfigError, ConfigResult, DisplaySettings, StorageSettings};

use std::sync::Arc;
use tracing::info;

use shopfront_cart::{CartStore, CartStoreConfig};
use shopfront_catalog::{CatalogClient, ProductSource};
use shopfront_storage::{Database, DbConfig, KeyValueStore, MemoryStore};

use crate::error::ApiResult;

/// Opened application state.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<dyn ProductSource>,
    pub cart: CartStore,
    database: Option<Database>,
}

impl AppState {
    /// Opens storage and the catalog client, then waits for the saved cart.
    pub async fn open(config: AppConfig) -> ApiResult<Self> {
        let catalog: Arc<dyn ProductSource> = Arc::new(CatalogClient::new(
            &config.catalog.base_url,
            config.catalog_timeout(),
        )?);

        let (storage, database): (Arc<dyn KeyValueStore>, Option<Database>) = if config.storage.in_memory {
            info!("Using in-memory cart storage");
            (Arc::new(MemoryStore::new()), None)
        } else {
            let path = config.database_path()?;
            info!(?path, "Database path determined");
            let db = Database::new(DbConfig::new(path)).await?;
            (Arc::new(db.clone()), Some(db))
        };

        let state = Self::with_parts(config, catalog, storage);
        state.cart.ready().await;

        Ok(AppState { database, ..state })
    }

    /// Assembles state from already-built parts. The cart store starts
    /// loading immediately.
    pub fn with_parts(config: AppConfig, catalog: Arc<dyn ProductSource>, storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = CartStore::open(storage, CartStoreConfig::with_key(config.storage.cart_key.clone()));

        AppState {
            config,
            catalog,
            cart,
            database: None,
        }
    }

    /// Lets pending cart writes land, then releases storage.
    pub async fn shutdown(self) {
        self.cart.close().await;
        if let Some(db) = self.database {
            db.close().await;
        }
    }
}
