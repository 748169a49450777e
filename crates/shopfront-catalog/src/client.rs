//! # Catalog Client
//!
//! HTTP client for the product catalog.
//!
//! ## Endpoints
//! ```text
//! GET {base}/products        → [Product, ...]
//! GET {base}/products/{id}   → Product   (200 with an empty body when unknown)
//! ```
//!
//! Listings drop products that fail to decode or validate, with a warning.
//! A single-product fetch reports them as errors instead.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use shopfront_core::validation::validate_product;
use shopfront_core::{Product, ProductId};

use crate::error::{CatalogError, CatalogResult};

/// Default catalog service.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can list and look up products.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full product list.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;

    /// Fetches one product by id.
    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product>;
}

/// Catalog client over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(CatalogClient { client, base_url })
    }

    /// Client for the default catalog service.
    pub fn with_defaults() -> CatalogResult<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn get_text(&self, url: &str) -> CatalogResult<String> {
        debug!(url = %url, "Catalog request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ProductSource for CatalogClient {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let body = self.get_text(&self.endpoint("products")).await?;
        parse_product_list(&body)
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        let body = self.get_text(&self.endpoint(&format!("products/{}", id))).await?;
        parse_product(&body, id)
    }
}

/// Checks that `raw` is an absolute http(s) URL.
pub fn parse_base_url(raw: &str) -> CatalogResult<Url> {
    let invalid = |reason: String| CatalogError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Decodes a product listing, skipping entries that don't decode or validate.
pub fn parse_product_list(body: &str) -> CatalogResult<Vec<Product>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = entries.len();

    let products: Vec<Product> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Product>(entry) {
            Ok(product) => match validate_product(&product) {
                Ok(()) => Some(product),
                Err(e) => {
                    warn!(product_id = product.id.get(), error = %e, "Skipping invalid product");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Skipping undecodable product");
                None
            }
        })
        .collect();

    debug!(total, kept = products.len(), "Parsed product listing");
    Ok(products)
}

/// Decodes a single product response for `id`.
pub fn parse_product(body: &str, id: ProductId) -> CatalogResult<Product> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(CatalogError::NotFound(id));
    }

    let product: Product = serde_json::from_str(trimmed)?;
    validate_product(&product).map_err(|source| CatalogError::InvalidProduct {
        id: product.id,
        source,
    })?;

    Ok(product)
}
