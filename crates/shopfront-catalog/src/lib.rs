//! # shopfront-catalog: Product Catalog Client
//!
//! Read-only access to the remote product catalog.
//!
//! ## Usage
//! ```rust,ignore
//! use shopfront_catalog::{CatalogClient, ProductSource};
//!
//! let catalog = CatalogClient::with_defaults()?;
//! for product in catalog.fetch_products().await? {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

pub mod client;
pub mod error;
pub mod memory;

pub use client::{CatalogClient, ProductSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{CatalogError, CatalogResult};
pub use memory::StaticCatalog;
