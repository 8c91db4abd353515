//! # Storefront Demo Entry Point
//!
//! Replays the cart page against the in-memory catalog and promo service
//! and logs the order summary at each step.
//!
//! ```bash
//! ALASKA_SERVICE_LATENCY_MS=0 RUST_LOG=info cargo run -p storefront
//! ```

#[tokio::main]
async fn main() {
    // Setup lives in lib.rs for testability
    if let Err(err) = storefront::run().await {
        tracing::error!("Storefront failed: {}", err);
        std::process::exit(1);
    }
}
