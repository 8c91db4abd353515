//! # Domain Types
//!
//! Core domain types used by the cart store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewLineItem   │──►│    LineItem     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  validated      │   │  id (LineId)    │   │  bps (u32)      │       │
//! │  │  input for add  │   │  product_id     │   │  700 = 7%       │       │
//! │  │                 │   │  unit_price     │   └─────────────────┘       │
//! │  │                 │   │  quantity ≥ 1   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ProductId ─ weak reference into the external catalog                  │
//! │  LineId    ─ assigned by the cart store, never by the UI               │
//! │  Quantity  ─ an integer that cannot drop below 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_quantity, validate_title, ValidationResult};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (the storefront's estimated sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage string such as `"7"` or `"8.25"`.
    ///
    /// Parsed without floating point, so `"8.25"` is exactly 825 bps.
    pub fn parse_percentage(pct: &str) -> ValidationResult<Self> {
        let hundredths: Money = pct.trim().trim_end_matches('%').parse().map_err(|_| {
            ValidationError::InvalidFormat {
                field: "tax rate".to_string(),
                reason: format!("'{}' is not a percentage with at most 2 decimals", pct),
            }
        })?;
        let bps = u32::try_from(hundredths.cents()).map_err(|_| ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10000,
        })?;
        crate::validation::validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a catalog product.
///
/// Only a weak reference: the catalog is external and the product may
/// disappear after it was added to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a line in a cart.
///
/// Assigned by [`CartStore`](crate::cart::CartStore) from a monotonic
/// counter. Never reused within a cart, even after the line is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineId(u64);

impl LineId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        LineId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A line quantity. Always at least 1.
///
/// ## Clamping, Not Rejecting
/// ```text
/// quantity 3, offset(-1000)  →  1   (clamped, no error)
/// quantity 1, offset(-1)     →  1   (the "−" button at 1 is a no-op)
/// quantity 2, offset(+1)     →  3
/// ```
///
/// Deserialization goes through [`Quantity::new`], so a payload carrying
/// `0` or a negative number is refused instead of producing a broken line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting anything below 1.
    pub fn new(qty: i64) -> ValidationResult<Self> {
        validate_quantity(qty)?;
        Ok(Quantity(qty))
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Applies a signed delta, clamping at 1 and saturating at `i64::MAX`.
    #[must_use]
    pub fn offset(self, delta: i64) -> Self {
        Quantity(self.0.saturating_add(delta).max(1))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Quantity(self.0.saturating_add(other.0))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let qty = i64::deserialize(deserializer)?;
        Quantity::new(qty).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// New Line Item
// =============================================================================

/// Validated input for [`CartStore::add_item`](crate::cart::CartStore::add_item).
///
/// Construction is where bad input is refused; once a `NewLineItem`
/// exists, adding it to a cart cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    /// Variant label, e.g. "Wild-Caught, 1lb Package". Part of the merge key.
    pub options: String,
    pub image_ref: Option<String>,
}

impl NewLineItem {
    /// Creates a new line item input with quantity 1 and no options.
    ///
    /// ## Rules
    /// - `title` must not be blank
    /// - `unit_price` must not be negative (free items are fine)
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        unit_price: Money,
    ) -> ValidationResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        validate_price_cents(unit_price.cents())?;

        Ok(NewLineItem {
            product_id,
            title: title.trim().to_string(),
            unit_price,
            quantity: Quantity::ONE,
            options: String::new(),
            image_ref: None,
        })
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into().trim().to_string();
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One entry in the cart: a product/options combination and a quantity.
///
/// ## Price Freezing
/// `unit_price` is captured when the line is created. Later catalog price
/// changes never alter an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineId,
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub(crate) quantity: Quantity,
    pub options: String,
    pub image_ref: Option<String>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    pub(crate) fn from_new(id: LineId, item: NewLineItem) -> Self {
        LineItem {
            id,
            product_id: item.product_id,
            title: item.title,
            unit_price: item.unit_price,
            quantity: item.quantity,
            options: item.options,
            image_ref: item.image_ref,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// `unit_price × quantity`, exact in cents.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity.get())
    }

    /// Whether `item` would merge into this line instead of creating a new one.
    pub(crate) fn matches(&self, item: &NewLineItem) -> bool {
        self.product_id == item.product_id && self.options == item.options
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
