//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  CatalogError ──┐                                                       │
//! │  StorageError ──┤                                                       │
//! │  CoreError ─────┼──► ApiError { code, message } ──► stderr / --json    │
//! │  ConfigError ───┘                                    exit status 1      │
//! │                                                                         │
//! │  Cart mutations never produce errors: persistence failures are logged  │
//! │  by the cart store and never reach this type.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use shopfront_catalog::CatalogError;
use shopfront_core::CoreError;
use shopfront_storage::StorageError;

use crate::state::ConfigError;

/// Error returned from storefront commands.
///
/// With `--json` this is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product 999 not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product does not exist
    NotFound,

    /// Input or catalog data failed validation
    ValidationError,

    /// Catalog unreachable or returned an error
    CatalogError,

    /// Durable storage could not be opened
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Cart operation not possible (e.g. checkout of an empty cart)
    CartError,

    /// Anything else
    Internal,
}

/// Result type for storefront commands.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} {} not found", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => ApiError::not_found("Product", id),
            CatalogError::InvalidProduct { .. } => ApiError::validation(err.to_string()),
            CatalogError::InvalidBaseUrl { .. } => ApiError::new(ErrorCode::ConfigError, err.to_string()),
            CatalogError::Transport(_) | CatalogError::Status { .. } | CatalogError::Decode(_) => {
                tracing::error!(error = %err, "Catalog request failed");
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
        }
    }
}

/// Converts storage errors to API errors.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage failure");
        ApiError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::cart("Your cart is empty"),
            CoreError::MalformedCart(_) => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ProductId;

    #[test]
    fn test_catalog_error_codes() {
        let err = ApiError::from(CatalogError::NotFound(ProductId::new(999)));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product 999 not found");

        let err = ApiError::from(CatalogError::Status {
            status: 502,
            url: "https://fakestoreapi.com/products".into(),
        });
        assert_eq!(err.code, ErrorCode::CatalogError);
    }

    #[test]
    fn test_empty_cart_is_cart_error() {
        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_json_shape() {
        let err = ApiError::not_found("Product", 7);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product 7 not found");
    }
}
