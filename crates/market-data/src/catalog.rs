//! # In-Memory Catalog
//!
//! A [`CatalogLookup`] backed by a map, with switches for latency and
//! outages so callers can exercise the slow and failing paths.
//!
//! ```text
//! find_product(id)
//!      │
//!      ▼
//! sleep(latency) ──► available? ── no ──► Err(ServiceError::Unavailable)
//!                        │
//!                       yes
//!                        ▼
//!                  products.get(id) ──► Ok(Some(product)) / Ok(None)
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use market_core::error::{ServiceError, ServiceResult};
use market_core::{CartStore, CatalogLookup, CatalogProduct, ProductId};

use crate::fixtures;

const SERVICE: &str = "catalog";

/// In-memory product catalog.
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, CatalogProduct>,
    /// Catalog order, for listings.
    order: Vec<ProductId>,
    available: AtomicBool,
    latency: Duration,
}

impl InMemoryCatalog {
    /// Creates an empty catalog with no latency.
    pub fn new() -> Self {
        InMemoryCatalog {
            products: HashMap::new(),
            order: Vec::new(),
            available: AtomicBool::new(true),
            latency: Duration::ZERO,
        }
    }

    /// Creates a catalog holding every product in [`fixtures::PRODUCTS`].
    pub fn seeded() -> Self {
        fixtures::PRODUCTS
            .iter()
            .fold(Self::new(), |catalog, fixture| catalog.with_product(fixture.to_product()))
    }

    /// Adds or replaces a product.
    pub fn with_product(mut self, product: CatalogProduct) -> Self {
        if !self.products.contains_key(&product.id) {
            self.order.push(product.id);
        }
        self.products.insert(product.id, product);
        self
    }

    /// Delays every lookup by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Simulates the catalog service going down or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products not already in `cart`, in catalog order, at most `limit`.
    pub fn suggestions_for(&self, cart: &CartStore, limit: usize) -> Vec<CatalogProduct> {
        self.order
            .iter()
            .filter(|id| !cart.lines().any(|line| line.product_id == **id))
            .filter_map(|id| self.products.get(id))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn find_product(&self, id: ProductId) -> ServiceResult<Option<CatalogProduct>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            warn!(product_id = %id, "Catalog lookup failed: service unavailable");
            return Err(ServiceError::unavailable(SERVICE, "service is offline"));
        }

        let product = self.products.get(&id).cloned();
        debug!(product_id = %id, found = product.is_some(), "Catalog lookup");
        Ok(product)
    }
}
