//! # Commands Module
//!
//! Everything the storefront UI can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart page: lines, quantities, promo, summary
//! └── product.rs  ◄─── Product lookup, suggestions
//! ```
//!
//! ## How Commands Work
//! Each command takes exactly the state it needs and returns a
//! serializable response or an [`ApiError`](crate::error::ApiError):
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState, config: &StoreConfig) -> CartResponse
//!
//! // Needs a collaborator too
//! async fn add_to_cart(catalog: &dyn CatalogLookup, cart: &CartState, ...)
//! async fn apply_promo_code(promos: &dyn PromoValidator, cart: &CartState, ...)
//! ```

pub mod cart;
pub mod product;

pub use cart::{CartResponse, CartSummary};
