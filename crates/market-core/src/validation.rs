//! # Validation Module
//!
//! Input validation for the cart engine.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── "Apply" disabled while the promo field is blank                   │
//! │  └── "−" disabled at quantity 1                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Runs when NewLineItem / Quantity / PromoCode are constructed      │
//! │  └── A failure here means nothing changed and nothing was called       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart store                                                   │
//! │  └── Clamps instead of rejecting (quantity never below 1)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_PROMO_CODE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product title copied into a line.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters after trimming
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a promo code and returns it trimmed.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty after trimming
/// - At most `MAX_PROMO_CODE_LEN` characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_promo_code;
///
/// assert_eq!(validate_promo_code("  north10 ").unwrap(), "north10");
/// assert!(validate_promo_code("   ").is_err());
/// assert!(validate_promo_code("TEN OFF").is_err());
/// ```
pub fn validate_promo_code(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "promo code".to_string(),
        });
    }

    if code.chars().count() > MAX_PROMO_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for a new line.
///
/// ## Rules
/// - Must be positive (> 0). There is no upper bound in the cart itself;
///   stock limits are checked against the catalog when adding.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(3999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a rate in basis points (tax rate, percentage discount).
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    validate_bps("tax rate", bps)
}

/// Validates a percentage discount in basis points (0% to 100%).
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    validate_bps("discount percent", bps)
}

fn validate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
