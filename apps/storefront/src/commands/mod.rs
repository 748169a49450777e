//! # Commands Module
//!
//! One function per storefront action. Each takes the opened [`AppState`]
//! and returns a serializable result, which `lib.rs` prints as text or JSON.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Commands                                  │
//! │                                                                         │
//! │  PRODUCT (product.rs)           CART (cart.rs)                         │
//! │  ────────────────────           ──────────────                         │
//! │  • list_products                • get_cart                              │
//! │  • get_product                  • add_to_cart                           │
//! │                                 • remove_from_cart                      │
//! │  CONFIG (config.rs)             • increase_quantity                     │
//! │  ──────────────────             • decrease_quantity                     │
//! │  • get_config                   • clear_cart                            │
//! │                                 • checkout                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`AppState`]: crate::state::AppState

pub mod cart;
pub mod config;
pub mod product;
