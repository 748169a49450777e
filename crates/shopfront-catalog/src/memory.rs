//! In-memory product source.

use async_trait::async_trait;

use shopfront_core::{Product, ProductId};

use crate::client::ProductSource;
use crate::error::{CatalogError, CatalogResult};

/// Serves a fixed product list. Used by tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }
}

#[async_trait]
impl ProductSource for StaticCatalog {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Money, Rating};

    #[tokio::test]
    async fn test_lookup() {
        let catalog = StaticCatalog::new(vec![Product {
            id: ProductId::new(3),
            title: "Mens Cotton Jacket".into(),
            price: Money::from_cents(5599),
            description: String::new(),
            category: "men's clothing".into(),
            image: String::new(),
            rating: Rating { rate: 4.7, count: 500 },
        }]);

        assert_eq!(catalog.fetch_products().await.unwrap().len(), 1);
        assert_eq!(catalog.fetch_product(ProductId::new(3)).await.unwrap().title, "Mens Cotton Jacket");
        assert!(matches!(
            catalog.fetch_product(ProductId::new(4)).await,
            Err(CatalogError::NotFound(_))
        ));
    }
}
