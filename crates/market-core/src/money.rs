//! # Money Module
//!
//! Provides the `Money` type for every price, subtotal and total in the cart.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats drifts:                                       │
//! │    39.99 * 2 + 0.07 tax ... = 85.57859999999999  ❌                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3999 * 2 = 7998 cents, exact                                         │
//! │    Tax is rounded ONCE, on the amount it applies to                     │
//! │    Decimal text ("12.99") is parsed digit by digit, never via f64       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::money::Money;
//!
//! let price = Money::from_cents(3999); // $39.99
//! let line = price * 2;                // $79.98
//! assert_eq!(line.cents(), 7998);
//!
//! let fee: Money = "12.99".parse().unwrap();
//! assert_eq!(fee.cents(), 1299);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money Flows
/// ```text
/// CatalogProduct.unit_price ──► LineItem.unit_price (frozen)
///                                    │
///                                    ▼  × quantity
///                              LineItem.line_total ──► Σ subtotal
///                                                        │
///                    tax, shipping, discount ◄───────────┘
///                                    │
///                                    ▼
///                               CartTotals.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use market_core::money::Money;
    ///
    /// let price = Money::from_cents(1299); // $12.99
    /// assert_eq!(price.cents(), 1299);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 is the half-cent that makes 0.5 round up.
    ///
    /// ```rust
    /// use market_core::money::Money;
    /// use market_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(7998); // $79.98
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(700)); // 7%
    /// // $79.98 × 7% = $5.5986 → $5.60
    /// assert_eq!(tax.cents(), 560);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money::from_cents(scale_bps(self.0, rate.bps()))
    }

    /// Returns `bps` basis points of this amount (1000 bps = 10%).
    ///
    /// Used for percentage promo discounts. Same rounding as tax.
    ///
    /// ```rust
    /// use market_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(7998);
    /// assert_eq!(subtotal.percentage(1000).cents(), 800); // 10% of $79.98
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        Money::from_cents(scale_bps(self.0, bps))
    }

    /// Multiplies a unit price by a quantity, saturating instead of wrapping.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// `amount * bps / 10000`, rounded half-up, computed in i128 and clamped
/// back into i64.
fn scale_bps(amount: i64, bps: u32) -> i64 {
    let scaled = (amount as i128 * bps as i128 + 5000) / 10000;
    scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"12.99"`, `"100"`, `"$5.5"` or `"-3.25"`.
///
/// At most two fractional digits are accepted; anything finer than a cent
/// is a format error rather than being silently rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' is not a decimal amount with at most 2 decimals", raw),
        };

        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        let (major, minor) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if major.is_empty() && minor.is_empty() {
            return Err(invalid());
        }
        if minor.len() > 2
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.99` / `-$5.50`.
///
/// Store-specific symbols are handled by the storefront's config.
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

// Arithmetic saturates at the i64 bounds. A quantity pushed to i64::MAX
// yields a saturated line total, and summing those must not panic.

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
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
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
        let money = Money::from_cents(3999);
        assert_eq!(money.cents(), 3999);
        assert_eq!(money.dollars(), 39);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(12, 99).cents(), 1299);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(9857).to_string(), "$98.57");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-b).cents(), -500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [3999, 29999, 7999]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 41997);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        let one = Money::from_cents(1);

        assert_eq!(max + one, max);
        assert_eq!(min - one, min);
        assert_eq!((-min).cents(), i64::MAX);

        let mut acc = max;
        acc += one;
        assert_eq!(acc, max);
        acc = min;
        acc -= one;
        assert_eq!(acc, min);

        let total: Money = [max, max, one].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_tax_rounds_once_half_up() {
        // $50.00 at 7% = $3.50 exactly
        assert_eq!(Money::from_cents(5000).calculate_tax(TaxRate::from_bps(700)).cents(), 350);
        // $79.98 at 7% = $5.5986 → $5.60
        assert_eq!(Money::from_cents(7998).calculate_tax(TaxRate::from_bps(700)).cents(), 560);
        // $0.50 at 7% = $0.035 → $0.04
        assert_eq!(Money::from_cents(50).calculate_tax(TaxRate::from_bps(700)).cents(), 4);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(Money::from_cents(10000).percentage(1000).cents(), 1000);
        assert_eq!(Money::from_cents(7998).percentage(1500).cents(), 1200); // 1199.7
        assert_eq!(Money::from_cents(7998).percentage(0).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    }

    #[test]
    fn test_parse_decimal_amounts() {
        assert_eq!("12.99".parse::<Money>().unwrap().cents(), 1299);
        assert_eq!("100".parse::<Money>().unwrap().cents(), 10000);
        assert_eq!("100.00".parse::<Money>().unwrap().cents(), 10000);
        assert_eq!("5.5".parse::<Money>().unwrap().cents(), 550);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!(" $39.99 ".parse::<Money>().unwrap().cents(), 3999);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
    }

    #[test]
    fn test_parse_rejects_malformed_amounts() {
        for bad in ["", ".", "abc", "1.999", "1,99", "12.3.4", "--1", "1e3"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should not parse");
        }
    }
}
