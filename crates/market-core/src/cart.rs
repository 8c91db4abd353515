//! # Cart Store
//!
//! The single source of truth for cart contents and the money derived
//! from them.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Shopper Action           Store Call                 Effect             │
//! │  ──────────────           ──────────                 ──────             │
//! │                                                                         │
//! │  Add to Cart ───────────► add_item(item) ──────────► insert or merge   │
//! │                                                                         │
//! │  "+" / "−" ─────────────► change_quantity(id, ±n) ─► clamp at 1        │
//! │                                                                         │
//! │  Remove ────────────────► remove_item(id) ─────────► delete if present │
//! │                                                                         │
//! │  Apply promo ───────────► apply_promo(applied) ────► replace promo     │
//! │                                                                         │
//! │  Order summary ─────────► totals() ────────────────► derived, fresh    │
//! │                                                                         │
//! │  Unknown ids are no-ops. Nothing here returns an error.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line's quantity is ≥ 1
//! - Line ids are unique and never reused; iteration is insertion order
//! - No total is stored, so none can go stale

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::money::Money;
use crate::pricing::{CartTotals, PricingConfig};
use crate::promo::AppliedPromo;
use crate::types::{LineId, LineItem, NewLineItem, ProductId, Quantity};

/// A shopping cart: line items, an optional promo, and the pricing rules
/// used to total them.
///
/// ## Ownership
/// One store per shopper session, owned by whoever holds it. The
/// storefront wraps it in a mutex; nothing here is global.
#[derive(Debug, Clone)]
pub struct CartStore {
    lines: IndexMap<LineId, LineItem>,
    next_line_id: u64,
    promo: Option<AppliedPromo>,
    pricing: PricingConfig,
    created_at: DateTime<Utc>,
}

impl CartStore {
    /// Creates an empty cart priced with `pricing`.
    pub fn new(pricing: PricingConfig) -> Self {
        CartStore {
            lines: IndexMap::new(),
            next_line_id: 1,
            promo: None,
            pricing,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item to the cart.
    ///
    /// ## Behavior
    /// - A line with the same product and options exists: its quantity grows
    /// - Otherwise: a new line is appended with a fresh id
    ///
    /// The existing line keeps its original frozen price when merging.
    ///
    /// ## Returns
    /// The id of the line that now holds the item.
    pub fn add_item(&mut self, item: NewLineItem) -> LineId {
        if let Some(line) = self.lines.values_mut().find(|line| line.matches(&item)) {
            line.quantity = line.quantity + item.quantity;
            return line.id;
        }

        let id = LineId::new(self.next_line_id);
        self.next_line_id += 1;
        self.lines.insert(id, LineItem::from_new(id, item));
        id
    }

    /// Adds `delta` to a line's quantity, clamped so it never drops below 1.
    ///
    /// ## Returns
    /// - `Some(new_quantity)` if the line exists
    /// - `None` if it does not (nothing changes)
    pub fn change_quantity(&mut self, id: LineId, delta: i64) -> Option<Quantity> {
        let line = self.lines.get_mut(&id)?;
        line.quantity = line.quantity.offset(delta);
        Some(line.quantity)
    }

    /// Removes a line. Removing an unknown id is a no-op.
    ///
    /// The remaining lines keep their relative order.
    pub fn remove_item(&mut self, id: LineId) -> Option<LineItem> {
        self.lines.shift_remove(&id)
    }

    /// Empties the cart and drops any promo.
    ///
    /// Line ids keep counting up, so ids from before the clear never come back.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo = None;
        self.created_at = Utc::now();
    }

    /// Records a redeemed promo, replacing any earlier one.
    ///
    /// Use [`promo::redeem`](crate::promo::redeem) to obtain `promo`.
    pub fn apply_promo(&mut self, promo: AppliedPromo) {
        self.promo = Some(promo);
    }

    /// Drops the applied promo, returning it if there was one.
    pub fn remove_promo(&mut self) -> Option<AppliedPromo> {
        self.promo.take()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: LineId) -> Option<&LineItem> {
        self.lines.get(&id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .values()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Units of `product_id` across every line, whatever the options.
    pub fn quantity_of(&self, product_id: ProductId) -> i64 {
        self.lines
            .values()
            .filter(|line| line.product_id == product_id)
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Derived Money
    // =========================================================================

    /// Σ `unit_price × quantity` over all lines. Exact to the cent.
    pub fn compute_subtotal(&self) -> Money {
        self.lines.values().map(LineItem::line_total).sum()
    }

    /// Tax on `amount` at the configured rate.
    pub fn compute_tax(&self, amount: Money) -> Money {
        self.pricing.tax_on(amount)
    }

    /// Shipping for an order worth `amount`: the fee below the free-shipping
    /// threshold, zero at or above it.
    pub fn compute_shipping(&self, amount: Money) -> Money {
        self.pricing.shipping_for(amount)
    }

    /// The applied promo's discount on `subtotal`, or zero.
    pub fn compute_discount(&self, subtotal: Money) -> Money {
        self.promo
            .as_ref()
            .map(|promo| promo.discount.amount_off(subtotal))
            .unwrap_or_default()
    }

    /// `subtotal + tax + shipping − discount`.
    pub fn compute_total(&self) -> Money {
        self.totals().total
    }

    /// Every derived value at once, computed from the current lines.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::cart::CartStore;
    /// use market_core::money::Money;
    /// use market_core::pricing::PricingConfig;
    /// use market_core::types::{NewLineItem, ProductId};
    ///
    /// let mut cart = CartStore::new(PricingConfig::default());
    /// let price = Money::from_cents(3999);
    /// let salmon = NewLineItem::new(ProductId::new(123), "Salmon", price).unwrap();
    /// cart.add_item(salmon.clone());
    /// cart.add_item(salmon);
    ///
    /// let totals = cart.totals();
    /// assert_eq!(totals.subtotal.cents(), 7998);
    /// assert_eq!(totals.tax.cents(), 560);
    /// assert_eq!(totals.shipping.cents(), 1299);
    /// assert_eq!(totals.total.cents(), 9857);
    /// ```
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.compute_subtotal();
        let discount = self.compute_discount(subtotal);
        let tax = self.compute_tax(self.pricing.tax_base.amount(subtotal, discount));
        let shipping = self.compute_shipping(self.pricing.shipping_base.amount(subtotal, discount));

        CartTotals {
            item_count: self.len(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            tax,
            shipping,
            total: subtotal + tax + shipping - discount,
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
