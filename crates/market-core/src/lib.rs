//! # market-core: Cart & Pricing Engine for Alaska Marketplace
//!
//! Everything the storefront's cart page shows is derived here: line items,
//! subtotal, estimated tax, shipping, promo discount and total.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Alaska Marketplace Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product page ──► Cart page ──► Order summary ──► Checkout   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    add_to_cart, change_quantity, apply_promo_code, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   money   │  │  pricing  │  │   promo   │  │   │
//! │  │   │ CartStore │  │   Money   │  │  Config   │  │  redeem   │  │   │
//! │  │   │ LineItem  │  │  TaxRate  │  │  Totals   │  │ Validator │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • PORTS ARE TRAITS                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogLookup / PromoValidator         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           Catalog service        Promo service                  │   │
//! │  │           (market-data provides in-memory stand-ins)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart store and its derived totals
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Tax/shipping configuration and the totals snapshot
//! - [`promo`] - Promo codes, the promo service port, redemption
//! - [`catalog`] - The catalog port and catalog-to-line conversion
//! - [`types`] - Identifiers, quantities, line items
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules
//!
//! ## Design Principles
//!
//! 1. **Derived, Never Stored**: totals are recomputed from the lines on every read
//! 2. **Integer Money**: all amounts are cents (i64); rounding happens once
//! 3. **Clamp, Don't Fail**: cart mutations never error; unknown ids are no-ops
//! 4. **Async Only at the Ports**: the cart itself is synchronous
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{CartStore, Money, NewLineItem, PricingConfig, ProductId};
//!
//! let mut cart = CartStore::new(PricingConfig::default());
//! let price = Money::from_cents(29999);
//! let line = cart.add_item(
//!     NewLineItem::new(ProductId::new(456), "Handcrafted Inuit Sculpture", price).unwrap(),
//! );
//! cart.change_quantity(line, -5); // clamps at 1
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.cents(), 29999);
//! assert_eq!(totals.tax.cents(), 2100); // 7%, rounded half-up
//! assert!(totals.has_free_shipping());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartStore;
pub use catalog::{CatalogLookup, CatalogProduct};
pub use error::{CoreError, PromoError, ServiceError, ValidationError};
pub use money::Money;
pub use pricing::{CartTotals, PricingBase, PricingConfig};
pub use promo::{AppliedPromo, PromoCode, PromoDecision, PromoDiscount, PromoValidator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Estimated sales tax: 7% (700 basis points).
pub const DEFAULT_TAX_RATE_BPS: u32 = 700;

/// Flat shipping fee below the free-shipping threshold: $12.99.
pub const DEFAULT_SHIPPING_FEE_CENTS: i64 = 1299;

/// Orders at or above $100.00 ship free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 10000;

/// Longest promo code accepted before the promo service is asked.
pub const MAX_PROMO_CODE_LEN: usize = 32;
