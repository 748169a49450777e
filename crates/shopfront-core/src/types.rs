//! # Domain Types
//!
//! Catalog types shared by the cart store, the catalog client and the app.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Rating      │   │   ProductId     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  rate (0-5)     │   │  u32, stable    │       │
//! │  │  title          │   │  count          │   │  catalog key    │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  │  description    │                                                    │
//! │  │  category       │                                                    │
//! │  │  image (URL)    │                                                    │
//! │  │  rating         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The JSON shape matches the catalog API field for field, so a `Product`
//! decoded from the API can be stored inside a cart line unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Stable catalog identifier of a product.
///
/// The cart is keyed by this id: at most one line per `ProductId`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product id from its catalog number.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw catalog number.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Aggregate customer rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average rating, 0 to 5.
    pub rate: f64,

    /// Number of reviews behind the average.
    pub count: u32,
}

impl Default for Rating {
    fn default() -> Self {
        Rating {
            rate: 0.0,
            count: 0,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the catalog.
///
/// Read-only to the cart: the store keeps a copy inside each line item and
/// never edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, non-negative. Decimal on the wire.
    #[ts(type = "number")]
    pub price: Money,

    /// Long description shown on the detail screen.
    #[serde(default)]
    pub description: String,

    /// Catalog category (e.g. "electronics").
    #[serde(default)]
    pub category: String,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Customer rating.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Returns the line total for `quantity` units of this product.
    #[inline]
    pub fn price_for(&self, quantity: u32) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_decodes_catalog_shape() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_id_is_bare_number() {
        assert_eq!(serde_json::to_string(&ProductId::new(42)).unwrap(), "42");
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn test_optional_fields_default() {
        let product: Product =
            serde_json::from_str(r#"{"id": 9, "title": "Mug", "price": 4}"#).unwrap();
        assert!(product.description.is_empty());
        assert_eq!(product.rating, Rating::default());
        assert_eq!(product.price_for(3).cents(), 1200);
    }
}
