//! # Pricing Module
//!
//! Configured constants and policies that turn a subtotal into a total.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Totals Pipeline                                  │
//! │                                                                         │
//! │  subtotal = Σ unit_price × quantity                                     │
//! │      │                                                                  │
//! │      ├──► discount = promo.amount_off(subtotal)   (capped at subtotal) │
//! │      │                                                                  │
//! │      ├──► tax      = tax_rate × base(tax_base)                          │
//! │      │                                                                  │
//! │      ├──► shipping = fee if base(shipping_base) < threshold, else 0    │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  total = subtotal + tax + shipping − discount                           │
//! │                                                                         │
//! │  base(BeforeDiscount) = subtotal                                        │
//! │  base(AfterDiscount)  = subtotal − discount                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached. Every value is derived from the current lines
//! each time it is asked for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_price_cents, validate_tax_rate_bps, ValidationResult};
use crate::{
    DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS, DEFAULT_SHIPPING_FEE_CENTS, DEFAULT_TAX_RATE_BPS,
};

// =============================================================================
// Pricing Base
// =============================================================================

/// Which amount a tax or shipping rule is evaluated against once a promo
/// discount is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingBase {
    /// The full subtotal, ignoring any discount.
    #[default]
    BeforeDiscount,
    /// The subtotal minus the promo discount.
    AfterDiscount,
}

impl PricingBase {
    /// Picks the amount this policy applies to.
    #[inline]
    pub fn amount(self, subtotal: Money, discount: Money) -> Money {
        match self {
            PricingBase::BeforeDiscount => subtotal,
            PricingBase::AfterDiscount => subtotal - discount,
        }
    }
}

impl fmt::Display for PricingBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingBase::BeforeDiscount => write!(f, "before_discount"),
            PricingBase::AfterDiscount => write!(f, "after_discount"),
        }
    }
}

impl FromStr for PricingBase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "before_discount" | "before" | "pre_discount" => Ok(PricingBase::BeforeDiscount),
            "after_discount" | "after" | "post_discount" => Ok(PricingBase::AfterDiscount),
            _ => Err(ValidationError::NotAllowed {
                field: "pricing base".to_string(),
                allowed: vec!["before_discount".to_string(), "after_discount".to_string()],
            }),
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Tax and shipping configuration for a cart.
///
/// ## Default Values
/// - Tax: 7% (estimated sales tax)
/// - Shipping: $12.99 below $100.00, free at or above
/// - Tax and free-shipping threshold both look at the pre-discount subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub tax_rate: TaxRate,
    pub shipping_fee: Money,
    pub free_shipping_threshold: Money,
    /// Whether tax is charged on the subtotal before or after a promo.
    pub tax_base: PricingBase,
    /// Whether the free-shipping threshold compares the subtotal before or
    /// after a promo.
    pub shipping_base: PricingBase,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            shipping_fee: Money::from_cents(DEFAULT_SHIPPING_FEE_CENTS),
            free_shipping_threshold: Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            tax_base: PricingBase::BeforeDiscount,
            shipping_base: PricingBase::BeforeDiscount,
        }
    }
}

impl PricingConfig {
    /// Checks that rates and amounts are in range.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_tax_rate_bps(self.tax_rate.bps())?;
        validate_price_cents(self.shipping_fee.cents())?;
        validate_price_cents(self.free_shipping_threshold.cents())?;
        Ok(())
    }

    /// Tax on `amount` at the configured rate.
    ///
    /// Rounded once, on the whole amount, never per line.
    #[inline]
    pub fn tax_on(&self, amount: Money) -> Money {
        amount.calculate_tax(self.tax_rate)
    }

    /// Shipping for an order worth `amount`.
    ///
    /// The threshold is inclusive: exactly $100.00 ships free.
    #[inline]
    pub fn shipping_for(&self, amount: Money) -> Money {
        if amount < self.free_shipping_threshold {
            self.shipping_fee
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// A snapshot of every derived value in a cart.
///
/// Built fresh by [`CartStore::totals`](crate::cart::CartStore::totals);
/// never stored on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of quantities across lines.
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    #[inline]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    #[inline]
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront() {
        let config = PricingConfig::default();
        assert_eq!(config.tax_rate.bps(), 700);
        assert_eq!(config.shipping_fee.cents(), 1299);
        assert_eq!(config.free_shipping_threshold.cents(), 10000);
        assert_eq!(config.tax_base, PricingBase::BeforeDiscount);
        assert_eq!(config.shipping_base, PricingBase::BeforeDiscount);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tax_on_fifty_dollars() {
        let config = PricingConfig::default();
        assert_eq!(config.tax_on(Money::from_cents(5000)).cents(), 350);
    }

    #[test]
    fn test_shipping_threshold_is_inclusive() {
        let config = PricingConfig::default();
        assert_eq!(config.shipping_for(Money::from_cents(9999)).cents(), 1299);
        assert_eq!(config.shipping_for(Money::from_cents(10000)).cents(), 0);
        assert_eq!(config.shipping_for(Money::from_cents(10001)).cents(), 0);
        assert_eq!(config.shipping_for(Money::zero()).cents(), 1299);
    }

    #[test]
    fn test_pricing_base_amount() {
        let subtotal = Money::from_cents(10500);
        let discount = Money::from_cents(1050);
        assert_eq!(PricingBase::BeforeDiscount.amount(subtotal, discount), subtotal);
        assert_eq!(PricingBase::AfterDiscount.amount(subtotal, discount).cents(), 9450);
    }

    #[test]
    fn test_pricing_base_parse() {
        assert_eq!("before_discount".parse::<PricingBase>().unwrap(), PricingBase::BeforeDiscount);
        assert_eq!("After-Discount".parse::<PricingBase>().unwrap(), PricingBase::AfterDiscount);
        assert_eq!("post_discount".parse::<PricingBase>().unwrap(), PricingBase::AfterDiscount);
        assert!("sometimes".parse::<PricingBase>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_partial_fields() {
        let config: PricingConfig = serde_json::from_str(
            r#"{ "tax_rate": 825, "tax_base": "after_discount" }"#,
        )
        .unwrap();
        assert_eq!(config.tax_rate.bps(), 825);
        assert_eq!(config.tax_base, PricingBase::AfterDiscount);
        assert_eq!(config.shipping_fee.cents(), 1299);
    }

    #[test]
    fn test_validate_rejects_negative_fee() {
        let config = PricingConfig {
            shipping_fee: Money::from_cents(-1),
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
