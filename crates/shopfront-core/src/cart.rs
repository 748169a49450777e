//! # Cart
//!
//! The cart model: line items, the five cart operations and cart totals.
//!
//! ## Cart Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation              In cart                 Not in cart             │
//! │  ─────────              ───────                 ───────────             │
//! │  add(product)           quantity + 1            push {product, 1}       │
//! │  remove(id)             line removed            no-op                   │
//! │  increase(id)           quantity + 1            no-op                   │
//! │  decrease(id)           quantity - 1 if > 1     no-op                   │
//! │  clear()                all lines removed       -                       │
//! │                                                                         │
//! │  INVARIANTS:                                                            │
//! │  • At most one line per product id                                      │
//! │  • Every quantity is >= 1 (decrease stops at 1, never removes)          │
//! │  • Lines stay in insertion order                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations never fail. Each returns whether the cart changed, which the
//! store uses only for logging.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::validate_price;

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart and how many of it.
///
/// Serialized as `{"product": {...}, "quantity": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    /// Copy of the product taken when it was first added.
    pub product: Product,

    /// Units of the product, always >= 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line for a freshly added product.
    pub fn new(product: Product) -> Self {
        CartLineItem {
            product,
            quantity: 1,
        }
    }

    /// Returns the product id this line is keyed by.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price_for(self.quantity)
    }
}

// =============================================================================
// Cart Operation
// =============================================================================

/// A single cart mutation, as issued by a screen.
///
/// The store records these while its initial load is in flight and replays
/// them on top of the loaded cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    Add(Product),
    Remove(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Clear,
}

impl CartOp {
    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartOp::Add(_) => "add_to_cart",
            CartOp::Remove(_) => "remove_from_cart",
            CartOp::Increase(_) => "increase_quantity",
            CartOp::Decrease(_) => "decrease_quantity",
            CartOp::Clear => "clear_cart",
        }
    }

    /// The product the operation targets, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartOp::Add(product) => Some(product.id),
            CartOp::Remove(id) | CartOp::Increase(id) | CartOp::Decrease(id) => Some(*id),
            CartOp::Clear => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an insertion-ordered sequence of line items.
///
/// Serializes as a plain JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from existing line items, checking the cart invariants.
    ///
    /// ## Errors
    /// - `MustBePositive` if any quantity is 0
    /// - `Duplicate` if two lines share a product id
    /// - `Negative` if a line's unit price is below zero
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            validate_price(item.product.price)?;
            if item.quantity == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                });
            }
            if !seen.insert(item.product_id()) {
                return Err(ValidationError::Duplicate {
                    field: "product.id".to_string(),
                    value: item.product_id().to_string(),
                });
            }
        }
        Ok(Cart { items })
    }

    /// Decodes a persisted cart payload.
    ///
    /// ## Errors
    /// - `MalformedCart` if the JSON is not an array of line items
    /// - `Validation` if the lines break a cart invariant
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        let items: Vec<CartLineItem> = serde_json::from_str(payload)?;
        Ok(Cart::from_items(items)?)
    }

    /// Encodes the cart for storage.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Returns the line items in insertion order.
    #[inline]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Consumes the cart, returning its line items.
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Finds the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product_id() == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.product_id() == id)
    }

    /// Adds one unit of a product.
    ///
    /// An existing line gains one unit; otherwise a new line with quantity 1
    /// is appended at the end. Always changes the cart.
    pub fn add(&mut self, product: &Product) -> bool {
        if let Some(item) = self.get_mut(product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartLineItem::new(product.clone()));
        }
        true
    }

    /// Removes the line for a product. No-op if absent.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id() != id);
        self.items.len() != initial_len
    }

    /// Adds one unit to an existing line. No-op if absent.
    pub fn increase(&mut self, id: ProductId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.quantity < u32::MAX => {
                item.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Takes one unit off an existing line, but never below 1.
    ///
    /// A line at quantity 1 is left alone; removal is always explicit.
    pub fn decrease(&mut self, id: ProductId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Applies one operation, returning whether the cart changed.
    pub fn apply(&mut self, op: &CartOp) -> bool {
        match op {
            CartOp::Add(product) => self.add(product),
            CartOp::Remove(id) => self.remove(*id),
            CartOp::Increase(id) => self.increase(*id),
            CartOp::Decrease(id) => self.decrease(*id),
            CartOp::Clear => self.clear(),
        }
    }

    /// Sum of `price × quantity` over all lines. Zero when empty.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Returns the number of distinct products in the cart.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Computes the summary shown under the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart summary: subtotal, shipping and total.
///
/// Shipping is always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.total_price();
        let shipping = Money::zero();
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::Rating;

    fn test_product(id: u32, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            description: String::new(),
            category: "test".to_string(),
            image: format!("https://example.com/{}.png", id),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    fn quantities(cart: &Cart) -> Vec<(u32, u32)> {
        cart.items()
            .iter()
            .map(|i| (i.product_id().get(), i.quantity))
            .collect()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000));
        assert_eq!(quantities(&cart), vec![(1, 1)]);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 1000);
        cart.add(&p1);
        cart.add(&p1);
        assert_eq!(quantities(&cart), vec![(1, 2)]);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&test_product(3, 100));
        cart.add(&test_product(1, 100));
        cart.add(&test_product(3, 100));
        cart.add(&test_product(2, 100));
        assert_eq!(quantities(&cart), vec![(3, 2), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_decrease_stops_at_one() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 1000);
        cart.add(&p1);

        assert!(!cart.decrease(p1.id));
        assert_eq!(quantities(&cart), vec![(1, 1)]);

        cart.increase(p1.id);
        assert!(cart.decrease(p1.id));
        assert_eq!(quantities(&cart), vec![(1, 1)]);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 1000);
        let p2 = test_product(2, 500);
        cart.add(&p1);
        cart.add(&p1);
        cart.add(&p2);

        assert!(cart.remove(p1.id));
        assert_eq!(quantities(&cart), vec![(2, 1)]);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 1000);
        cart.add(&p1);
        cart.add(&test_product(2, 500));

        assert!(cart.remove(p1.id));
        let after_first = cart.clone();
        assert!(!cart.remove(p1.id));
        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000));
        let before = cart.clone();
        let ghost = ProductId::new(99);

        assert!(!cart.remove(ghost));
        assert!(!cart.increase(ghost));
        assert!(!cart.decrease(ghost));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_price(), Money::zero());

        let p1 = test_product(1, 1000);
        let p2 = test_product(2, 500);
        cart.add(&p1);
        cart.add(&p1);
        cart.add(&p2);

        assert_eq!(cart.total_price(), Money::from_cents(2500));
    }

    #[test]
    fn test_totals_have_free_shipping() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000));
        cart.add(&test_product(1, 1000));
        cart.add(&test_product(2, 250));

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.cents(), 2250);
        assert!(totals.shipping.is_zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert!(!cart.clear());
        cart.add(&test_product(1, 1000));
        assert!(cart.clear());
        assert!(cart.is_empty());
    }

    /// Runs a fixed pseudo-random op sequence and checks the invariants after
    /// every step.
    #[test]
    fn test_invariants_hold_over_op_sequences() {
        let products: Vec<Product> = (1..=4).map(|id| test_product(id, 100 * id as i64)).collect();
        let mut cart = Cart::new();
        let mut seed: u32 = 0x2545_f491;

        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let product = &products[(seed % 4) as usize];
            let op = match (seed >> 8) % 6 {
                0 | 1 => CartOp::Add(product.clone()),
                2 => CartOp::Remove(product.id),
                3 => CartOp::Increase(product.id),
                4 => CartOp::Decrease(product.id),
                _ if seed % 50 == 0 => CartOp::Clear,
                _ => CartOp::Decrease(product.id),
            };
            cart.apply(&op);

            let ids: HashSet<_> = cart.items().iter().map(|i| i.product_id()).collect();
            assert_eq!(ids.len(), cart.len(), "duplicate line after {}", op.name());
            assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let expected: Money = cart
                .items()
                .iter()
                .map(|i| i.product.price * i.quantity)
                .sum();
            assert_eq!(cart.total_price(), expected);
        }
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let mut cart = Cart::new();
        cart.add(&test_product(2, 1999));
        cart.add(&test_product(1, 5));
        cart.add(&test_product(2, 1999));

        let json = cart.to_json().unwrap();
        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(quantities(&restored), vec![(2, 2), (1, 1)]);
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_persisted_shape() {
        let mut cart = Cart::new();
        cart.add(&test_product(7, 1050));
        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();

        assert_eq!(value[0]["quantity"], 1);
        assert_eq!(value[0]["product"]["id"], 7);
        assert_eq!(value[0]["product"]["price"], 10.5);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Cart::from_json("{\"not\": \"an array\"}"),
            Err(CoreError::MalformedCart(_))
        ));
    }

    #[test]
    fn test_from_items_rejects_broken_invariants() {
        let p1 = test_product(1, 100);
        let dup = vec![CartLineItem::new(p1.clone()), CartLineItem::new(p1.clone())];
        assert!(matches!(
            Cart::from_items(dup),
            Err(ValidationError::Duplicate { .. })
        ));

        let zero = vec![CartLineItem {
            product: p1,
            quantity: 0,
        }];
        assert!(matches!(
            Cart::from_items(zero),
            Err(ValidationError::MustBePositive { .. })
        ));

        let negative = vec![CartLineItem::new(test_product(3, -1000))];
        assert!(matches!(
            Cart::from_items(negative),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let payload = r#"[{"product":{"id":1,"title":"x","price":-10.0},"quantity":3}]"#;
        assert!(matches!(
            Cart::from_json(payload),
            Err(CoreError::Validation(ValidationError::Negative { .. }))
        ));
    }

    #[test]
    fn test_total_price_saturates_on_huge_lines() {
        let mut cart = Cart::new();
        let price = Money::from_decimal(5e16).unwrap();
        cart.add(&Product { price, ..test_product(1, 0) });
        cart.add(&Product { price, ..test_product(2, 0) });
        assert_eq!(cart.total_price().cents(), i64::MAX);
    }
}
