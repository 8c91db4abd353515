//! # Product Commands
//!
//! Catalog reads used by the product page and the cart page's
//! "You might also like" strip.

use tracing::debug;

use market_core::catalog::require_product;
use market_core::{CatalogLookup, CatalogProduct, ProductId};
use market_data::InMemoryCatalog;

use crate::error::ApiError;
use crate::state::CartState;

/// How many suggestions the cart page shows by default.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 4;

/// Gets one product by id.
///
/// ## Errors
/// - `NOT_FOUND`: no such product
/// - `SERVICE_UNAVAILABLE`: catalog could not be reached
pub async fn get_product(
    catalog: &dyn CatalogLookup,
    product_id: u64,
) -> Result<CatalogProduct, ApiError> {
    debug!(product_id, "get_product command");
    Ok(require_product(catalog, ProductId::new(product_id)).await?)
}

/// Products not already in the cart, in catalog order.
pub fn suggested_products(
    catalog: &InMemoryCatalog,
    cart: &CartState,
    limit: Option<usize>,
) -> Vec<CatalogProduct> {
    let limit = limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    debug!(limit, "suggested_products command");
    cart.with_cart(|c| catalog.suggestions_for(c, limit))
}
