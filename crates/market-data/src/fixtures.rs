//! # Storefront Fixtures
//!
//! The storefront's mock products and a handful of sample promo codes,
//! used to seed the in-memory collaborators for development and tests.
//!
//! ## Fixture Groups
//! - Cart page items: salmon, sculpture, northern lights print
//! - Cart page suggestions: preserves, bath salts, coasters, necklace
//! - Product page: the cedar totem and its related products
//! - Promo codes: one percentage, one fixed amount, one expired

use market_core::{CatalogProduct, Money, PromoDiscount, ProductId};

/// Delay the storefront's mock fetches used before resolving.
pub const SIMULATED_LATENCY_MS: u64 = 800;

// =============================================================================
// Products
// =============================================================================

pub const SALMON_ID: ProductId = ProductId::new(123);
pub const SCULPTURE_ID: ProductId = ProductId::new(456);
pub const NORTHERN_LIGHTS_ID: ProductId = ProductId::new(789);
pub const TOTEM_ID: ProductId = ProductId::new(500);

/// A catalog entry in const form.
#[derive(Debug, Clone, Copy)]
pub struct ProductFixture {
    pub id: ProductId,
    pub title: &'static str,
    pub price_cents: i64,
    pub image_ref: &'static str,
    /// `None` means stock is not tracked.
    pub stock_level: Option<i64>,
    pub options: &'static [&'static str],
}

impl ProductFixture {
    pub fn to_product(&self) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            title: self.title.to_string(),
            unit_price: Money::from_cents(self.price_cents),
            image_ref: Some(self.image_ref.to_string()),
            stock_level: self.stock_level,
            options: self.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Every mock product, in catalog order.
pub const PRODUCTS: &[ProductFixture] = &[
    // Cart page
    ProductFixture {
        id: SALMON_ID,
        title: "Authentic Alaskan Salmon",
        price_cents: 3999,
        image_ref: "/assets/images/products/salmon.jpg",
        stock_level: Some(40),
        options: &["Wild-Caught, 1lb Package", "Wild-Caught, 2lb Package"],
    },
    ProductFixture {
        id: SCULPTURE_ID,
        title: "Handcrafted Inuit Sculpture",
        price_cents: 29999,
        image_ref: "/assets/images/products/sculpture.jpg",
        stock_level: Some(3),
        options: &["Small Size, Traditional Style", "Medium Size, Traditional Style"],
    },
    ProductFixture {
        id: NORTHERN_LIGHTS_ID,
        title: "Northern Lights Photography Print",
        price_cents: 7999,
        image_ref: "/assets/images/products/northern-lights.jpg",
        stock_level: None,
        options: &["12x16 inches, Canvas Print", "16x20 inches, Canvas Print"],
    },
    // Cart page suggestions
    ProductFixture {
        id: ProductId::new(101),
        title: "Alaska Wild Berry Preserves",
        price_cents: 2499,
        image_ref: "/assets/images/products/preserves.jpg",
        stock_level: Some(60),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(102),
        title: "Glacier Ice Bath Salts",
        price_cents: 1899,
        image_ref: "/assets/images/products/bath-salts.jpg",
        stock_level: Some(35),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(103),
        title: "Alaskan Cedar Coasters (Set of 4)",
        price_cents: 2999,
        image_ref: "/assets/images/products/coasters.jpg",
        stock_level: Some(20),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(104),
        title: "Native Bead Necklace",
        price_cents: 4599,
        image_ref: "/assets/images/products/necklace.jpg",
        stock_level: Some(5),
        options: &[],
    },
    // Product page
    ProductFixture {
        id: TOTEM_ID,
        title: "Authentic Hand-Carved Alaskan Cedar Totem",
        price_cents: 18999,
        image_ref: "/assets/images/products/totem1.jpg",
        stock_level: Some(8),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(201),
        title: "Alaskan Native Dream Catcher",
        price_cents: 4999,
        image_ref: "/assets/images/products/dreamcatcher.jpg",
        stock_level: Some(12),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(202),
        title: "Hand-Painted Spirit Mask",
        price_cents: 15999,
        image_ref: "/assets/images/products/mask.jpg",
        stock_level: Some(4),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(203),
        title: "Traditional Ulu Knife",
        price_cents: 7999,
        image_ref: "/assets/images/products/ulu.jpg",
        stock_level: Some(15),
        options: &[],
    },
    ProductFixture {
        id: ProductId::new(204),
        title: "Handwoven Cedar Basket",
        price_cents: 12999,
        image_ref: "/assets/images/products/basket.jpg",
        stock_level: Some(6),
        options: &[],
    },
];

/// The cart page's starting cart: (product, options, quantity).
pub const MOCK_CART: &[(ProductId, &str, i64)] = &[
    (SALMON_ID, "Wild-Caught, 1lb Package", 2),
    (SCULPTURE_ID, "Small Size, Traditional Style", 1),
    (NORTHERN_LIGHTS_ID, "12x16 inches, Canvas Print", 1),
];

// =============================================================================
// Promo Codes
// =============================================================================

/// A promo code in const form.
#[derive(Debug, Clone, Copy)]
pub struct PromoFixture {
    pub code: &'static str,
    pub discount: PromoDiscount,
    pub description: &'static str,
    pub active: bool,
}

pub const PROMOS: &[PromoFixture] = &[
    PromoFixture {
        code: "NORTH10",
        discount: PromoDiscount::Percent(1000),
        description: "10% off your order",
        active: true,
    },
    PromoFixture {
        code: "SALMON5",
        discount: PromoDiscount::Amount(Money::from_cents(500)),
        description: "$5.00 off your order",
        active: true,
    },
    PromoFixture {
        code: "AURORA25",
        discount: PromoDiscount::Percent(2500),
        description: "25% off (winter sale)",
        active: false,
    },
];
