//! # shopfront-core: Pure Domain Logic for Shopfront
//!
//! This crate is the **model** of the storefront. It contains the product
//! and cart types plus every cart rule as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront screens (commands)                   │   │
//! │  │    Product list ──► Product detail ──► Cart ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            shopfront-cart (CartStore + persistence)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Rating   │  │  (cents)  │  │  CartOp   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Rating, ProductId)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart line items, cart operations and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Product and cart rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::cart::Cart;
//! use shopfront_core::money::Money;
//! use shopfront_core::types::{Product, ProductId, Rating};
//!
//! let shirt = Product {
//!     id: ProductId::new(1),
//!     title: "Slim Fit T-Shirt".to_string(),
//!     price: Money::from_cents(1000),
//!     description: String::new(),
//!     category: "men's clothing".to_string(),
//!     image: "https://example.com/shirt.png".to_string(),
//!     rating: Rating { rate: 4.1, count: 259 },
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&shirt);
//! cart.add(&shirt);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_price(), Money::from_cents(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartOp, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is persisted under.
///
/// One key holds the whole cart as a JSON array of line items.
pub const CART_STORAGE_KEY: &str = "cart";

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;
