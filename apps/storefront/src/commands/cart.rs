//! # Cart Commands
//!
//! Cart screen actions.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐   checkout    ┌──────────┐   │
//! │  │  Empty   │───────────────►│ In Cart  │──────────────►│  Empty   │   │
//! │  │  Cart    │                │          │  (summary     │  Cart    │   │
//! │  └──────────┘                └──────────┘   printed)    └──────────┘   │
//! │                                   │                                     │
//! │                      add / remove / increase / decrease                │
//! │                                   │                                     │
//! │                              clear_cart ──────────────► (back to empty) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action returns the cart as it stands afterwards.

use serde::Serialize;
use tracing::{debug, info};

use shopfront_core::{Cart, CartLineItem, CartTotals, CoreError, ProductId};

use crate::error::ApiResult;
use crate::state::AppState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

fn current(state: &AppState) -> CartResponse {
    CartResponse::from(&state.cart.snapshot())
}

/// Gets the current cart contents.
pub fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    current(state)
}

/// Looks the product up in the catalog, then adds one unit of it.
///
/// ## Errors
/// Catalog failures (unknown id, unreachable service). The cart itself
/// never rejects an add.
pub async fn add_to_cart(state: &AppState, id: ProductId) -> ApiResult<CartResponse> {
    debug!(product_id = id.get(), "add_to_cart command");

    let product = state.catalog.fetch_product(id).await?;
    state.cart.add_to_cart(product);

    Ok(current(state))
}

/// Removes a product's line. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(state: &AppState, id: ProductId) -> CartResponse {
    debug!(product_id = id.get(), "remove_from_cart command");
    state.cart.remove_from_cart(id);
    current(state)
}

pub fn increase_quantity(state: &AppState, id: ProductId) -> CartResponse {
    debug!(product_id = id.get(), "increase_quantity command");
    state.cart.increase_quantity(id);
    current(state)
}

/// Removes one unit. A line at quantity 1 stays; use remove for that.
pub fn decrease_quantity(state: &AppState, id: ProductId) -> CartResponse {
    debug!(product_id = id.get(), "decrease_quantity command");
    state.cart.decrease_quantity(id);
    current(state)
}

pub fn clear_cart(state: &AppState) -> CartResponse {
    debug!("clear_cart command");
    state.cart.clear_cart();
    current(state)
}

/// Places the order: returns what was bought and empties the cart.
///
/// No payment is taken.
pub fn checkout(state: &AppState) -> ApiResult<CartResponse> {
    let order = state.cart.take_all();
    if order.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    info!(
        items = order.len(),
        total = %order.total_price(),
        "Order placed"
    );

    Ok(CartResponse::from(&order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::test_state;
    use shopfront_core::Money;

    #[tokio::test]
    async fn test_add_fetches_from_catalog() {
        let state = test_state().await;

        add_to_cart(&state, ProductId::new(1)).await.unwrap();
        let cart = add_to_cart(&state, ProductId::new(1)).await.unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.totals.subtotal, Money::from_cents(21990));
        assert_eq!(cart.totals.total, cart.totals.subtotal);
        assert!(cart.totals.shipping.is_zero());
    }

    #[tokio::test]
    async fn test_add_unknown_product_leaves_cart_alone() {
        let state = test_state().await;

        let err = add_to_cart(&state, ProductId::new(404)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&state).items.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_commands() {
        let state = test_state().await;
        add_to_cart(&state, ProductId::new(2)).await.unwrap();

        let cart = increase_quantity(&state, ProductId::new(2));
        assert_eq!(cart.items[0].quantity, 2);

        decrease_quantity(&state, ProductId::new(2));
        let cart = decrease_quantity(&state, ProductId::new(2));
        assert_eq!(cart.items[0].quantity, 1);

        let cart = remove_from_cart(&state, ProductId::new(9));
        assert_eq!(cart.items.len(), 1);

        let cart = remove_from_cart(&state, ProductId::new(2));
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empties_cart() {
        let state = test_state().await;
        add_to_cart(&state, ProductId::new(1)).await.unwrap();
        add_to_cart(&state, ProductId::new(2)).await.unwrap();

        let order = checkout(&state).unwrap();
        assert_eq!(order.totals.item_count, 2);
        assert_eq!(order.totals.total, Money::from_cents(10995 + 2230));
        assert!(get_cart(&state).items.is_empty());

        let err = checkout(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let state = test_state().await;
        add_to_cart(&state, ProductId::new(1)).await.unwrap();
        assert!(clear_cart(&state).items.is_empty());
    }

    #[test]
    fn test_response_json_shape() {
        let response = CartResponse::from(&Cart::new());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["items"].as_array().unwrap().is_empty());
        assert_eq!(json["totals"]["itemCount"], 0);
    }
}
