//! Cart store configuration.

use shopfront_core::CART_STORAGE_KEY;

/// Settings for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreConfig {
    /// Key the serialized cart is stored under.
    /// Default: `"cart"`
    pub storage_key: String,
}

impl CartStoreConfig {
    /// Uses a custom storage key.
    pub fn with_key(key: impl Into<String>) -> Self {
        CartStoreConfig {
            storage_key: key.into(),
        }
    }
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        CartStoreConfig {
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}
