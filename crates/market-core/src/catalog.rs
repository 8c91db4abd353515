//! # Catalog Port
//!
//! What the cart needs from the external catalog service, and how a
//! catalog entry becomes a cart line.
//!
//! The catalog is not always available. A failed lookup means "cannot add
//! this item right now", never a broken cart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ServiceResult, ValidationError};
use crate::money::Money;
use crate::types::{NewLineItem, ProductId, Quantity};

// =============================================================================
// Catalog Product
// =============================================================================

/// A product as the catalog describes it at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub image_ref: Option<String>,
    /// Units available. `None` means stock is not tracked.
    pub stock_level: Option<i64>,
    /// Variant labels the shopper can pick from. Empty means free-text
    /// options (or none) are accepted.
    #[serde(default)]
    pub options: Vec<String>,
}

impl CatalogProduct {
    /// Checks if `quantity` units can be sold.
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        match self.stock_level {
            None => true,
            Some(stock) => stock >= quantity,
        }
    }

    /// Builds the cart input for this product, freezing the current price.
    ///
    /// ## Checks
    /// - `options` must be one of the product's variants when it lists any
    /// - `quantity` must be in stock
    pub fn to_line_item(&self, options: &str, quantity: Quantity) -> CoreResult<NewLineItem> {
        let options = options.trim();
        if !self.options.is_empty() && !self.options.iter().any(|o| o == options) {
            return Err(ValidationError::NotAllowed {
                field: "options".to_string(),
                allowed: self.options.clone(),
            }
            .into());
        }

        if !self.can_fulfil(quantity.get()) {
            return Err(CoreError::InsufficientStock {
                product_id: self.id,
                available: self.stock_level.unwrap_or(0),
                requested: quantity.get(),
            });
        }

        let mut item = NewLineItem::new(self.id, &self.title, self.unit_price)?
            .with_quantity(quantity)
            .with_options(options);
        item.image_ref = self.image_ref.clone();
        Ok(item)
    }
}

// =============================================================================
// Catalog Lookup Port
// =============================================================================

/// The external catalog service.
///
/// `Ok(None)` means the product does not exist; `Err` means the catalog
/// could not be asked.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn find_product(&self, id: ProductId) -> ServiceResult<Option<CatalogProduct>>;
}

/// Looks a product up and turns the two failure kinds into [`CoreError`]s.
pub async fn require_product(
    catalog: &dyn CatalogLookup,
    id: ProductId,
) -> CoreResult<CatalogProduct> {
    catalog
        .find_product(id)
        .await
        .map_err(CoreError::CatalogUnavailable)?
        .ok_or(CoreError::ProductNotFound(id))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    fn salmon() -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(123),
            title: "Authentic Alaskan Salmon".to_string(),
            unit_price: Money::from_cents(3999),
            image_ref: Some("/assets/images/products/salmon.jpg".to_string()),
            stock_level: Some(8),
            options: vec![
                "Wild-Caught, 1lb Package".to_string(),
                "Wild-Caught, 2lb Package".to_string(),
            ],
        }
    }

    struct OneProduct(Option<CatalogProduct>);

    #[async_trait]
    impl CatalogLookup for OneProduct {
        async fn find_product(&self, id: ProductId) -> ServiceResult<Option<CatalogProduct>> {
            Ok(self.0.clone().filter(|p| p.id == id))
        }
    }

    struct Down;

    #[async_trait]
    impl CatalogLookup for Down {
        async fn find_product(&self, _id: ProductId) -> ServiceResult<Option<CatalogProduct>> {
            Err(ServiceError::unavailable("catalog", "timeout"))
        }
    }

    #[test]
    fn test_to_line_item_freezes_price() {
        let mut product = salmon();
        let item = product
            .to_line_item("Wild-Caught, 1lb Package", Quantity::new(2).unwrap())
            .unwrap();
        product.unit_price = Money::from_cents(4999);

        assert_eq!(item.unit_price.cents(), 3999);
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.image_ref.as_deref(), Some("/assets/images/products/salmon.jpg"));
    }

    #[test]
    fn test_to_line_item_checks_options_and_stock() {
        let product = salmon();
        assert!(matches!(
            product.to_line_item("Farmed", Quantity::ONE),
            Err(CoreError::Validation(ValidationError::NotAllowed { .. }))
        ));
        assert!(matches!(
            product.to_line_item("Wild-Caught, 1lb Package", Quantity::new(9).unwrap()),
            Err(CoreError::InsufficientStock { available: 8, requested: 9, .. })
        ));
    }

    #[test]
    fn test_untracked_stock_always_fulfils() {
        let product = CatalogProduct {
            stock_level: None,
            options: Vec::new(),
            ..salmon()
        };
        assert!(product.can_fulfil(10_000));
        assert!(product.to_line_item("any label", Quantity::new(500).unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_require_product_distinguishes_failures() {
        let catalog = OneProduct(Some(salmon()));
        assert!(require_product(&catalog, ProductId::new(123)).await.is_ok());
        assert!(matches!(
            require_product(&catalog, ProductId::new(999)).await,
            Err(CoreError::ProductNotFound(id)) if id == ProductId::new(999)
        ));
        assert!(matches!(
            require_product(&Down, ProductId::new(123)).await,
            Err(CoreError::CatalogUnavailable(_))
        ));
    }
}
