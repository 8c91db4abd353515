//! # Cart Commands
//!
//! Commands behind the storefront's cart page.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐   checkout    ┌──────────┐  │
//! │  │  Empty   │──────────────►│ In Cart  │─ ─ ─ ─ ─ ─ ─►│ (out of  │  │
//! │  │  Cart    │               │          │               │  scope)  │  │
//! │  └──────────┘               └──────────┘               └──────────┘  │
//! │       ▲                          │                                     │
//! │       │                     change_quantity                            │
//! │       │                     remove_from_cart                           │
//! │       │                     apply_promo_code / remove_promo_code       │
//! │       │                          │                                     │
//! │       └──────── clear_cart ◄─────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole cart, so the page re-renders from one
//! consistent snapshot.

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use market_core::catalog::require_product;
use market_core::{
    AppliedPromo, CartStore, CartTotals, CatalogLookup, CoreError, LineId, LineItem, ProductId,
    PromoValidator, Quantity,
};

use crate::error::ApiError;
use crate::state::{CartState, StoreConfig};

/// Cart response: lines, totals, promo, and display strings.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub promo: Option<AppliedPromo>,
    pub summary: CartSummary,
}

/// The order summary panel, pre-formatted.
///
/// ```text
/// ┌─────────────────────────────────┐
/// │  Order Summary        3 items   │
/// │  Subtotal             $459.96   │
/// │  Promo (NORTH10)      -$46.00   │
/// │  Shipping                Free   │
/// │  Estimated Tax (7%)    $32.20   │
/// │  ─────────────────────────────  │
/// │  Total                $446.16   │
/// └─────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// "1 item" / "3 items" (distinct lines)
    pub item_count: String,
    pub subtotal: String,
    /// Present only when a promo takes something off
    pub discount: Option<String>,
    /// "Free" or the formatted fee
    pub shipping: String,
    pub tax_label: String,
    pub tax: String,
    pub total: String,
}

impl CartResponse {
    pub fn build(cart: &CartStore, config: &StoreConfig) -> Self {
        let totals = cart.totals();
        CartResponse {
            items: cart.lines().cloned().collect(),
            totals,
            promo: cart.promo().cloned(),
            summary: CartSummary::build(&totals, cart, config),
        }
    }
}

impl CartSummary {
    fn build(totals: &CartTotals, cart: &CartStore, config: &StoreConfig) -> Self {
        let item_count = match totals.item_count {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        };

        CartSummary {
            item_count,
            subtotal: config.format_currency(totals.subtotal),
            discount: totals
                .has_discount()
                .then(|| config.format_currency(-totals.discount)),
            shipping: if totals.has_free_shipping() {
                "Free".to_string()
            } else {
                config.format_currency(totals.shipping)
            },
            tax_label: format!("Estimated Tax ({}%)", cart.pricing().tax_rate.percentage()),
            tax: config.format_currency(totals.tax),
            total: config.format_currency(totals.total),
        }
    }
}

/// Gets the current cart.
pub fn get_cart(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::build(c, config))
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - The product is looked up first; the cart is not locked while waiting
/// - Same product and options as an existing line: that line's quantity grows
/// - The price is frozen at the catalog's current price
///
/// ## Errors
/// - `VALIDATION_ERROR`: quantity below 1, or options not offered
/// - `NOT_FOUND`: no such product
/// - `SERVICE_UNAVAILABLE`: catalog could not be reached
/// - `INSUFFICIENT_STOCK`: cart + requested would exceed stock
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `options` - Variant label (default: none)
/// * `quantity` - Quantity to add (default: 1)
pub async fn add_to_cart(
    catalog: &dyn CatalogLookup,
    cart: &CartState,
    config: &StoreConfig,
    product_id: u64,
    options: Option<String>,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let product_id = ProductId::new(product_id);
    let quantity = Quantity::new(quantity.unwrap_or(1))?;
    debug!(%product_id, %quantity, "add_to_cart command");

    let product = require_product(catalog, product_id).await?;
    let item = product.to_line_item(options.as_deref().unwrap_or(""), quantity)?;

    cart.with_cart_mut(|c| {
        // Stock covers every line of this product, not just the new one
        let requested = c.quantity_of(product_id).saturating_add(quantity.get());
        if !product.can_fulfil(requested) {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: product.stock_level.unwrap_or(0),
                requested,
            });
        }

        let line = c.add_item(item);
        info!(%product_id, %line, "Added to cart");
        Ok(CartResponse::build(c, config))
    })
    .map_err(ApiError::from)
}

/// Changes a line's quantity by `delta`, never below 1.
///
/// Unknown line ids leave the cart as it was.
pub fn change_quantity(
    cart: &CartState,
    config: &StoreConfig,
    line_id: u64,
    delta: i64,
) -> CartResponse {
    debug!(line_id, delta, "change_quantity command");
    cart.with_cart_mut(|c| {
        if c.change_quantity(LineId::new(line_id), delta).is_none() {
            debug!(line_id, "change_quantity: no such line");
        }
        CartResponse::build(c, config)
    })
}

/// Removes a line. Removing twice is harmless.
pub fn remove_from_cart(cart: &CartState, config: &StoreConfig, line_id: u64) -> CartResponse {
    debug!(line_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove_item(LineId::new(line_id));
        CartResponse::build(c, config)
    })
}

/// Empties the cart and drops its promo.
pub fn clear_cart(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, config)
    })
}

/// Applies a promo code.
///
/// ## Errors
/// - `VALIDATION_ERROR`: blank or malformed code (promo service not called)
/// - `PROMO_REJECTED`: unknown or expired code
/// - `SERVICE_UNAVAILABLE`: promo service could not be reached
///
/// On any error the cart keeps its lines and any earlier promo.
pub async fn apply_promo_code(
    promos: &dyn PromoValidator,
    cart: &CartState,
    config: &StoreConfig,
    code: String,
) -> Result<CartResponse, ApiError> {
    debug!(code = %code, "apply_promo_code command");

    if let Err(err) = cart.apply_promo_code(promos, &code).await {
        warn!(code = %code.trim(), error = %err, "Promo code not applied");
        return Err(err.into());
    }

    Ok(get_cart(cart, config))
}

/// Removes the applied promo, if any.
pub fn remove_promo_code(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("remove_promo_code command");
    cart.with_cart_mut(|c| {
        c.remove_promo();
        CartResponse::build(c, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use market_core::PricingConfig;
    use market_data::fixtures::{NORTHERN_LIGHTS_ID, SALMON_ID, SCULPTURE_ID};
    use market_data::{InMemoryCatalog, PromoRuleSet};

    fn setup() -> (InMemoryCatalog, PromoRuleSet, CartState, StoreConfig) {
        let config = StoreConfig {
            service_latency_ms: 0,
            ..StoreConfig::default()
        };
        (
            InMemoryCatalog::seeded(),
            PromoRuleSet::seeded(),
            CartState::new(PricingConfig::default()),
            config,
        )
    }

    const SALMON_1LB: &str = "Wild-Caught, 1lb Package";

    #[tokio::test]
    async fn test_add_salmon_twice_merges() {
        let (catalog, _, cart, config) = setup();

        let salmon = || Some(SALMON_1LB.to_string());
        add_to_cart(&catalog, &cart, &config, SALMON_ID.get(), salmon(), None)
            .await
            .unwrap();
        let response = add_to_cart(&catalog, &cart, &config, SALMON_ID.get(), salmon(), None)
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity().get(), 2);
        assert_eq!(response.totals.total.cents(), 9857);
        assert_eq!(response.summary.item_count, "1 item");
        assert_eq!(response.summary.subtotal, "$79.98");
        assert_eq!(response.summary.tax, "$5.60");
        assert_eq!(response.summary.shipping, "$12.99");
        assert_eq!(response.summary.total, "$98.57");
        assert_eq!(response.summary.tax_label, "Estimated Tax (7%)");
        assert!(response.summary.discount.is_none());
    }

    #[tokio::test]
    async fn test_mock_cart_summary() {
        let (catalog, promos, cart, config) = setup();
        for (id, options, qty) in market_data::fixtures::MOCK_CART {
            add_to_cart(&catalog, &cart, &config, id.get(), Some(options.to_string()), Some(*qty))
                .await
                .unwrap();
        }

        let response = apply_promo_code(&promos, &cart, &config, "north10".to_string())
            .await
            .unwrap();
        assert_eq!(response.summary.item_count, "3 items");
        assert_eq!(response.summary.subtotal, "$459.96");
        assert_eq!(response.summary.discount.as_deref(), Some("-$46.00"));
        assert_eq!(response.summary.shipping, "Free");
        assert_eq!(response.summary.tax, "$32.20");
        assert_eq!(response.summary.total, "$446.16");
        assert_eq!(response.promo.unwrap().code, "NORTH10");
    }

    #[tokio::test]
    async fn test_add_errors() {
        let (catalog, _, cart, config) = setup();

        let err = add_to_cart(&catalog, &cart, &config, 999_999, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let salmon = SALMON_ID.get();
        let smoked = Some("Smoked".to_string());
        let err = add_to_cart(&catalog, &cart, &config, salmon, smoked, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let one_lb = || Some(SALMON_1LB.to_string());
        let err = add_to_cart(&catalog, &cart, &config, salmon, one_lb(), Some(0))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        catalog.set_available(false);
        let err = add_to_cart(&catalog, &cart, &config, salmon, one_lb(), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
        assert!(err.is_retryable());

        assert!(get_cart(&cart, &config).items.is_empty());
    }

    #[tokio::test]
    async fn test_stock_counts_lines_already_in_cart() {
        let (catalog, _, cart, config) = setup();
        // three sculptures in stock
        let small = Some("Small Size, Traditional Style".to_string());
        add_to_cart(&catalog, &cart, &config, SCULPTURE_ID.get(), small, Some(2))
            .await
            .unwrap();

        let err = add_to_cart(
            &catalog,
            &cart,
            &config,
            SCULPTURE_ID.get(),
            Some("Medium Size, Traditional Style".into()),
            Some(2),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Only 3 left in stock");
        assert_eq!(get_cart(&cart, &config).totals.total_quantity, 2);
    }

    #[tokio::test]
    async fn test_quantity_remove_and_clear() {
        let (catalog, promos, cart, config) = setup();
        let response = add_to_cart(
            &catalog,
            &cart,
            &config,
            NORTHERN_LIGHTS_ID.get(),
            Some("12x16 inches, Canvas Print".into()),
            Some(3),
        )
        .await
        .unwrap();
        let line = response.items[0].id.get();

        let response = change_quantity(&cart, &config, line, -1000);
        assert_eq!(response.items[0].quantity().get(), 1);

        let unchanged = change_quantity(&cart, &config, 4242, 5);
        assert_eq!(unchanged, response);

        apply_promo_code(&promos, &cart, &config, "SALMON5".to_string())
            .await
            .unwrap();
        let response = remove_promo_code(&cart, &config);
        assert!(response.promo.is_none());

        let response = remove_from_cart(&cart, &config, line);
        assert!(response.items.is_empty());
        assert_eq!(remove_from_cart(&cart, &config, line), response);

        let response = clear_cart(&cart, &config);
        assert_eq!(response.summary.item_count, "0 items");
        assert_eq!(response.summary.shipping, "$12.99");
    }

    #[tokio::test]
    async fn test_rejected_promo_keeps_cart() {
        let (catalog, promos, cart, config) = setup();
        add_to_cart(&catalog, &cart, &config, SALMON_ID.get(), Some(SALMON_1LB.into()), None)
            .await
            .unwrap();
        let before = get_cart(&cart, &config);

        let err = apply_promo_code(&promos, &cart, &config, "AURORA25".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PromoRejected);

        let err = apply_promo_code(&promos, &cart, &config, "  ".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        promos.set_available(false);
        let err = apply_promo_code(&promos, &cart, &config, "NORTH10".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);

        assert_eq!(get_cart(&cart, &config), before);
    }
}
