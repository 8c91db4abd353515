//! # Alaska Marketplace Storefront
//!
//! Session state and commands for the storefront's cart page, on top of
//! the `market-core` cart engine.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & demo run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Per-session cart (Arc<Mutex<CartStore>>)
//! │   └── config.rs   ◄─── StoreConfig: defaults, TOML, ALASKA_* env
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart page commands + CartResponse
//! │   └── product.rs  ◄─── Product lookup, suggestions
//! └── error.rs        ◄─── ApiError returned by commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use market_data::{fixtures, InMemoryCatalog, PromoRuleSet};

use commands::cart::{add_to_cart, apply_promo_code, change_quantity, get_cart};
use commands::product::suggested_products;
use commands::CartResponse;
use state::{CartState, StoreConfig};

/// Runs the storefront demo.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Demo                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter (RUST_LOG overrides)           │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → ALASKA_* environment                 │
/// │                                                                         │
/// │  3. Seed Collaborators ───────────────────────────────────────────────► │
/// │     • In-memory catalog and promo rules, with simulated latency         │
/// │                                                                         │
/// │  4. Replay the Cart Page ─────────────────────────────────────────────► │
/// │     • Add the mock cart, apply NORTH10 while bumping a quantity,        │
/// │       try an expired code, list suggestions                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = StoreConfig::load(None)?;
    info!(
        store = %config.store_name,
        tax_bps = config.pricing.tax_rate.bps(),
        latency_ms = config.service_latency_ms,
        "Starting storefront"
    );

    let catalog = InMemoryCatalog::seeded().with_latency(config.service_latency());
    let promos = PromoRuleSet::seeded().with_latency(config.service_latency());
    let cart = CartState::new(config.pricing);
    info!(session_id = %cart.session_id(), products = catalog.len(), "Session ready");

    for (product_id, options, quantity) in fixtures::MOCK_CART {
        add_to_cart(
            &catalog,
            &cart,
            &config,
            product_id.get(),
            Some(options.to_string()),
            Some(*quantity),
        )
        .await?;
    }
    log_summary("Mock cart loaded", &get_cart(&cart, &config));

    // The quantity change lands while NORTH10 is still being checked
    let first_line = cart.with_cart(|c| c.lines().next().map(|line| line.id.get()));
    let (promo, _) = tokio::join!(
        apply_promo_code(&promos, &cart, &config, "NORTH10".to_string()),
        async {
            if let Some(line) = first_line {
                change_quantity(&cart, &config, line, 1);
            }
        }
    );
    match promo {
        Ok(response) => log_summary("Promo applied", &response),
        Err(err) => warn!(code = ?err.code, "{}", err.message),
    }

    if let Err(err) = apply_promo_code(&promos, &cart, &config, "AURORA25".to_string()).await {
        warn!(code = ?err.code, "{}", err.message);
    }

    for product in suggested_products(&catalog, &cart, None) {
        info!(
            product_id = %product.id,
            price = %config.format_currency(product.unit_price),
            "You might also like: {}",
            product.title
        );
    }

    log_summary("Final cart", &get_cart(&cart, &config));
    Ok(())
}

fn log_summary(heading: &str, cart: &CartResponse) {
    let summary = &cart.summary;
    info!(
        items = %summary.item_count,
        subtotal = %summary.subtotal,
        discount = summary.discount.as_deref().unwrap_or("-"),
        shipping = %summary.shipping,
        tax = %summary.tax,
        total = %summary.total,
        "{}",
        heading
    );
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=market_data=trace` - Trace the collaborators only
/// - Default: INFO, DEBUG for the storefront and market crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,storefront=debug,market_core=debug,market_data=debug")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
