//! # market-data: In-Memory Collaborators for Alaska Marketplace
//!
//! The cart engine talks to a catalog service and a promo service through
//! the ports in `market-core`. This crate provides in-memory versions of
//! both, seeded from [`fixtures`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Alaska Marketplace Data Flow                         │
//! │                                                                         │
//! │  Storefront command (add_to_cart / apply_promo_code)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  market-core ports ── CatalogLookup ── PromoValidator                  │
//! │       │                     │                 │                         │
//! │       ▼                     ▼                 ▼                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  market-data (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────┐  ┌─────────────────┐  ┌──────────────┐   │   │
//! │  │   │ InMemoryCatalog │  │  PromoRuleSet   │  │   fixtures   │   │   │
//! │  │   │  (catalog.rs)   │  │   (promo.rs)    │  │ mock products│   │   │
//! │  │   │                 │  │                 │  │ sample promos│   │   │
//! │  │   │ latency, outage │  │ latency, outage │  │              │   │   │
//! │  │   └─────────────────┘  └─────────────────┘  └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_data::{fixtures, InMemoryCatalog, PromoRuleSet};
//!
//! let catalog = InMemoryCatalog::seeded();
//! let promos = PromoRuleSet::seeded();
//!
//! let product = catalog.find_product(fixtures::SALMON_ID).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod fixtures;
pub mod promo;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::InMemoryCatalog;
pub use promo::{PromoRule, PromoRuleSet};
