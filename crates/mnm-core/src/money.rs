//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A page script that sums item prices with floats:                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Twenty items at $0.10 each, summed one by one, can drift away from     │
//! │  $2.00 and only look right because the display rounds.                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Prices are parsed exactly (rust_decimal) ONCE at the boundary,       │
//! │    rounded to the currency's minor unit and kept as i64 from then on.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mnm_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(350); // $3.50
//!
//! // Arithmetic operations
//! let line = price * 3_u32;                     // $10.50
//! let total = line + Money::from_cents(400);    // $14.50
//! assert_eq!(total.cents(), 1450);
//!
//! // Parse page/config input exactly
//! let parsed = Money::parse("9.99", 2).unwrap();
//! assert_eq!(parsed.cents(), 999);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::MAX_CURRENCY_DECIMALS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Prices are never negative in a container, but the
///   type stays signed so differences can be expressed
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ChildItem.unit_price ──► line total (× quantity) ──► addons total
///                                                          │
/// ContainerConfig.base_price ─────────────────────────────►+──► total price
/// ContainerConfig.fixed_price ─────────────────(Fixed)─────────► total price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an exact decimal amount into minor units.
    ///
    /// The amount is rounded to `decimals` places (midpoint away from zero),
    /// so a fractional-cent price such as `0.125` becomes `13` cents. This
    /// happens once, at the boundary; the engine never sees fractions.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_decimal(Decimal::new(125, 3), 2).unwrap(); // 0.125
    /// assert_eq!(price.cents(), 13);
    ///
    /// let yen = Money::from_decimal(Decimal::new(500, 0), 0).unwrap();
    /// assert_eq!(yen.cents(), 500);
    /// ```
    pub fn from_decimal(value: Decimal, decimals: u8) -> Result<Money, ValidationError> {
        if decimals > MAX_CURRENCY_DECIMALS {
            return Err(ValidationError::OutOfRange {
                field: "decimals".to_string(),
                min: 0,
                max: i64::from(MAX_CURRENCY_DECIMALS),
            });
        }

        let scale = u32::from(decimals);
        let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(scale);

        let out_of_range = || ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: i64::MIN,
            max: i64::MAX,
        };

        // rescale() silently stops short when the mantissa would overflow
        if rounded.scale() != scale {
            return Err(out_of_range());
        }

        i64::try_from(rounded.mantissa())
            .map(Money)
            .map_err(|_| out_of_range())
    }

    /// Parses a decimal string (e.g. `"9.99"`) into minor units.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 2.5 ", 2).unwrap().cents(), 250);
    /// assert!(Money::parse("", 2).is_err());
    /// assert!(Money::parse("two", 2).is_err());
    /// ```
    pub fn parse(raw: &str, decimals: u8) -> Result<Money, ValidationError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let value = Decimal::from_str(raw).map_err(|e| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        })?;

        Money::from_decimal(value, decimals)
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(350); // $3.50
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 1050); // $10.50
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use [`crate::format::CurrencyFormat`] for anything
/// a customer sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Multiplication by a selection quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(i64::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3_u32).cents(), 3000);
        assert_eq!((Money::from_cents(i64::MAX) + b).cents(), i64::MAX);
    }

    #[test]
    fn test_multiply_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3).cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [150, 250, 1]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 401);
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(Money::parse("2.00", 2).unwrap().cents(), 200);
        assert_eq!(Money::parse("3.5", 2).unwrap().cents(), 350);
        assert_eq!(Money::parse("9.99", 2).unwrap().cents(), 999);
        assert_eq!(Money::parse("12", 2).unwrap().cents(), 1200);
        assert_eq!(Money::parse("0", 2).unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_rounds_fractional_minor_units() {
        assert_eq!(Money::parse("0.125", 2).unwrap().cents(), 13);
        assert_eq!(Money::parse("0.124", 2).unwrap().cents(), 12);
        assert_eq!(Money::parse("-0.125", 2).unwrap().cents(), -13);
    }

    #[test]
    fn test_parse_zero_decimal_currency() {
        assert_eq!(Money::parse("500", 0).unwrap().cents(), 500);
        assert_eq!(Money::parse("499.5", 0).unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("", 2),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("abc", 2),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Money::parse("1.00", 9),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    /// Twenty ten-cent items must add up to exactly two dollars.
    #[test]
    fn test_no_drift_across_many_small_prices() {
        let dime = Money::parse("0.10", 2).unwrap();
        let total: Money = std::iter::repeat(dime).take(20).sum();
        assert_eq!(total.cents(), 200);

        let third = Money::parse("0.1", 2).unwrap() + Money::parse("0.2", 2).unwrap();
        assert_eq!(third.cents(), 30);
    }
}
