//! Catalog error types.

use shopfront_core::{ProductId, ValidationError};
use thiserror::Error;

/// Errors from catalog requests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Catalog returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not the expected JSON.
    #[error("Could not decode catalog response: {0}")]
    Decode(String),

    /// The service has no product with this id.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The product decoded but breaks a catalog rule.
    #[error("Product {id} is invalid: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ValidationError,
    },
}

impl CatalogError {
    /// True when retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Transport(_) => true,
            CatalogError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CatalogError::Transport("timed out".into()).is_transient());
        assert!(CatalogError::Status { status: 503, url: "x".into() }.is_transient());
        assert!(!CatalogError::Status { status: 404, url: "x".into() }.is_transient());
        assert!(!CatalogError::NotFound(ProductId::new(9)).is_transient());
    }

    #[test]
    fn test_display() {
        let err = CatalogError::Status {
            status: 500,
            url: "https://fakestoreapi.com/products".into(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog returned 500 for https://fakestoreapi.com/products"
        );
    }
}
