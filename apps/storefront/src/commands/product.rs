//! # Product Commands
//!
//! Catalog browsing: the product list and product detail screens.

use tracing::debug;

use shopfront_core::{Product, ProductId};

use crate::error::ApiResult;
use crate::state::AppState;

/// Lists every valid product in the catalog.
pub async fn list_products(state: &AppState) -> ApiResult<Vec<Product>> {
    debug!("list_products command");
    Ok(state.catalog.fetch_products().await?)
}

/// Fetches one product for the detail screen.
pub async fn get_product(state: &AppState, id: ProductId) -> ApiResult<Product> {
    debug!(product_id = id.get(), "get_product command");
    Ok(state.catalog.fetch_product(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn test_list_and_get() {
        let state = test_state().await;

        let products = list_products(&state).await.unwrap();
        assert_eq!(products.len(), 2);

        let product = get_product(&state, ProductId::new(2)).await.unwrap();
        assert_eq!(product.title, "Mens Casual Premium Slim Fit T-Shirts");
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let state = test_state().await;
        let err = get_product(&state, ProductId::new(77)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
