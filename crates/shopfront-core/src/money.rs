//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON decimals: 109.95, 22.3, 7.95      │
//! │                                                                         │
//! │  Summed as floats:                                                      │
//! │    22.3 * 3 = 66.89999999999999  ❌ WRONG!                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Decode 22.3 ──► 2230 cents, 2230 * 3 = 6690 cents ──► 66.90          │
//! │    Floats only exist at the JSON boundary, never in arithmetic          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! `Money` serializes as a decimal JSON number (`109.95`), the same shape the
//! catalog API uses, so a persisted cart reads exactly like catalog data.
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(3); // $32.97
//! assert_eq!(line.cents(), 3297);
//! ```

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Decimal serde**: matches the catalog's `price` field
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLineItem.line_total() ──► Cart.total_price()
///                                                       │
///                                                       ▼
///                                          CartTotals { subtotal, total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN or infinite input. This is the only place a
    /// float becomes Money; it exists for the JSON boundary.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(109.95), Some(Money::from_cents(10995)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal amount (for serialization only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with the given currency symbol and no rounding.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2230).format_with("€"), "€22.30");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in dollars, e.g. `$10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds so cart totals never wrap.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde (decimal on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).ok_or_else(|| E::custom(format!("invalid amount: {}", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money::from_cents)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        assert_eq!(Money::from_decimal(22.3), Some(Money::from_cents(2230)));
        assert_eq!(Money::from_decimal(0.125), Some(Money::from_cents(13)));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [2230, 1000, 5]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 3235);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    /// Summing float prices drifts; summing cents does not.
    #[test]
    fn test_no_float_drift() {
        let price = Money::from_decimal(22.3).unwrap();
        assert_eq!(price.multiply_quantity(3).cents(), 6690);
    }

    #[test]
    fn test_serializes_as_decimal() {
        let json = serde_json::to_string(&Money::from_cents(10995)).unwrap();
        assert_eq!(json, "109.95");
    }

    #[test]
    fn test_deserializes_integers_and_decimals() {
        let m: Money = serde_json::from_str("7.95").unwrap();
        assert_eq!(m.cents(), 795);

        let m: Money = serde_json::from_str("15").unwrap();
        assert_eq!(m.cents(), 1500);

        assert!(serde_json::from_str::<Money>("\"12.00\"").is_err());
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(4).cents(), i64::MAX);
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!((big + big).cents(), i64::MAX);

        let mut acc = big;
        acc += big;
        assert_eq!(acc.cents(), i64::MAX);

        let total: Money = vec![big, big, big].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
