//! # Text Rendering
//!
//! Plain-text views of command results, one per screen.
//!
//! ```text
//! Product list       id, title, price, rating
//! Product detail     category, title, stars + reviews, price, description
//! Cart               lines, then Subtotal / Shipping FREE / Total
//! ```

use std::fmt::Write;

use shopfront_core::{CartLineItem, CartTotals, Product, MAX_RATING};

use crate::commands::cart::CartResponse;
use crate::state::AppConfig;

/// Longest title shown in list rows.
const TITLE_WIDTH: usize = 48;

/// Star row for a 0-5 rating: full stars for the whole part, a half star
/// for any fraction, empty stars for the rest.
pub fn rating_stars(rate: f64) -> String {
    let rate = rate.clamp(0.0, MAX_RATING);
    let stars = MAX_RATING as usize;
    let full = rate.floor() as usize;
    let half = rate.fract() > 0.0;

    (0..stars)
        .map(|i| {
            if i < full {
                '★'
            } else if i == full && half {
                '½'
            } else {
                '☆'
            }
        })
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

pub fn product_list(products: &[Product], config: &AppConfig) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>10}  {} {:.1}",
            product.id.get(),
            truncate(&product.title, TITLE_WIDTH),
            config.format_currency(product.price),
            rating_stars(product.rating.rate),
            product.rating.rate,
            width = TITLE_WIDTH,
        );
    }
    out
}

pub fn product_detail(product: &Product, config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.category);
    let _ = writeln!(out, "{}", product.title);
    let _ = writeln!(
        out,
        "{} {:.1} ({} reviews)",
        rating_stars(product.rating.rate),
        product.rating.rate,
        product.rating.count
    );
    let _ = writeln!(out, "{}", config.format_currency(product.price));
    let _ = writeln!(out);
    let _ = writeln!(out, "Description");
    let _ = writeln!(out, "{}", product.description);
    out
}

fn cart_line(item: &CartLineItem, config: &AppConfig) -> String {
    format!(
        "{:>4}  {:<width$}  {:>10} x {:<3} {:>10}",
        item.product.id.get(),
        truncate(&item.product.title, TITLE_WIDTH),
        config.format_currency(item.product.price),
        item.quantity,
        config.format_currency(item.line_total()),
        width = TITLE_WIDTH,
    )
}

fn summary(totals: &CartTotals, config: &AppConfig) -> String {
    let shipping = if totals.shipping.is_zero() {
        "FREE".to_string()
    } else {
        config.format_currency(totals.shipping)
    };

    format!(
        "Subtotal  {:>12}\nShipping  {:>12}\nTotal     {:>12}\n",
        config.format_currency(totals.subtotal),
        shipping,
        config.format_currency(totals.total)
    )
}

pub fn cart(cart: &CartResponse, config: &AppConfig) -> String {
    if cart.items.is_empty() {
        return "Your cart is empty\nLooks like you haven't added any products to your cart yet.\n".to_string();
    }

    let mut out = String::new();
    for item in &cart.items {
        let _ = writeln!(out, "{}", cart_line(item, config));
    }
    let _ = writeln!(out);
    out.push_str(&summary(&cart.totals, config));
    out
}

pub fn order(order: &CartResponse, config: &AppConfig) -> String {
    let mut out = String::from("Order placed\n\n");
    for item in &order.items {
        let _ = writeln!(out, "{}", cart_line(item, config));
    }
    let _ = writeln!(out);
    out.push_str(&summary(&order.totals, config));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Cart, Money, ProductId, Rating};

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops".into(),
            price: Money::from_cents(10995),
            description: "Your perfect pack for everyday use.".into(),
            category: "men's clothing".into(),
            image: String::new(),
            rating: Rating { rate: 3.9, count: 120 },
        }
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(3.9), "★★★½☆");
        assert_eq!(rating_stars(4.0), "★★★★☆");
        assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(5.0), "★★★★★");
        assert_eq!(rating_stars(0.5), "½☆☆☆☆");
    }

    #[test]
    fn test_product_detail() {
        let text = product_detail(&product(), &AppConfig::default());
        assert!(text.starts_with("men's clothing\n"));
        assert!(text.contains("3.9 (120 reviews)"));
        assert!(text.contains("$109.95"));
        assert!(text.ends_with("Your perfect pack for everyday use.\n"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let line = product_list(&[product()], &AppConfig::default());
        assert!(line.contains('…'));
        assert!(!line.contains("Laptops"));
    }

    #[test]
    fn test_cart_summary() {
        let mut c = Cart::new();
        c.add(&product());
        c.add(&product());

        let text = cart(&CartResponse::from(&c), &AppConfig::default());
        assert!(text.contains("x 2"));
        assert!(text.contains("$219.90"));
        assert!(text.contains("FREE"));
    }

    #[test]
    fn test_empty_cart() {
        let text = cart(&CartResponse::from(&Cart::new()), &AppConfig::default());
        assert!(text.starts_with("Your cart is empty"));
    }
}
