//! # Validation Module
//!
//! Checks for catalog data before it reaches the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field types, required fields                                      │
//! │  └── Money rejects NaN / infinite prices                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_product: title, price >= 0, rating 0-5, image URL        │
//! │  └── Cart::from_items: unique ids, quantity >= 1                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart operations (cannot fail)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use shopfront_core::validation::validate_rating;
//!
//! validate_rating(4.5).unwrap();
//! ```

use url::Url;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product title.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_title;
///
/// assert!(validate_title("Mens Casual Slim Fit").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an average rating (0 to 5 inclusive).
pub fn validate_rating(rate: f64) -> ValidationResult<()> {
    if !(0.0..=MAX_RATING).contains(&rate) {
        return Err(ValidationError::OutOfRange {
            field: "rating.rate".to_string(),
            min: 0.0,
            max: MAX_RATING,
        });
    }
    Ok(())
}

/// Validates an image URL. Empty is allowed (no image).
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_image_url;
///
/// assert!(validate_image_url("https://fakestoreapi.com/img/1.jpg").is_ok());
/// assert!(validate_image_url("").is_ok());
/// assert!(validate_image_url("not a url").is_err());
/// ```
pub fn validate_image_url(image: &str) -> ValidationResult<()> {
    if image.is_empty() {
        return Ok(());
    }
    Url::parse(image)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Product Validator
// =============================================================================

/// Validates a whole product as received from the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.get() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }
    validate_title(&product.title)?;
    validate_price(product.price)?;
    validate_rating(product.rating.rate)?;
    validate_image_url(&product.image)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
