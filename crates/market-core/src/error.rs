//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── ValidationError  - Input rejected locally, nothing changed        │
//! │  ├── ServiceError     - What a collaborator port reports               │
//! │  ├── CoreError        - Adding to the cart failed                      │
//! │  └── PromoError       - Promo code was not applied                     │
//! │                                                                         │
//! │  storefront errors (app)                                               │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ServiceError → CoreError / PromoError → ApiError → UI           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. "Not found / invalid" and "unavailable" are always distinct variants,
//!    so the UI can choose between showing an error and retrying
//! 3. Normal user mistakes (removing a removed line, decrementing at 1) are
//!    NOT errors - the cart absorbs them as no-ops

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur before any state is touched or any collaborator is
/// called. When one is returned, the caller can rely on nothing having changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a promo code with spaces, a malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Service Error
// =============================================================================

/// Failure reported by an external collaborator (catalog, promo service).
///
/// ## When This Occurs
/// - The service could not be reached or timed out
/// - The service answered with something the port cannot interpret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service is down or unreachable. Retrying may help.
    #[error("{service} is unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    /// The service answered, but not with anything usable.
    #[error("{service} returned an invalid response: {reason}")]
    InvalidResponse { service: String, reason: String },
}

impl ServiceError {
    /// Creates an Unavailable error for the named service.
    pub fn unavailable(service: impl Into<String>, reason: impl Into<String>) -> Self {
        ServiceError::Unavailable {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidResponse error for the named service.
    pub fn invalid_response(service: impl Into<String>, reason: impl Into<String>) -> Self {
        ServiceError::InvalidResponse {
            service: service.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for collaborator port calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Core Error
// =============================================================================

/// Errors from catalog-backed cart operations.
///
/// The cart store's own operations never fail; these come from the step
/// before it, when a product is looked up so it can be added.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The catalog could not be consulted, so nothing was added.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] ServiceError),

    /// Requested quantity exceeds what the catalog has in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 123, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 left in stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Promo Error
// =============================================================================

/// Why a promo code was not applied.
///
/// Whatever the variant, the cart is left exactly as it was, including any
/// promo applied earlier.
#[derive(Debug, Error)]
pub enum PromoError {
    /// The code was malformed and never sent to the promo service.
    #[error("Invalid promo code: {0}")]
    Validation(#[from] ValidationError),

    /// The promo service looked at the code and refused it.
    #[error("Promo code {code} was rejected: {reason}")]
    Rejected { code: String, reason: String },

    /// The promo service could not be reached. Retrying may help.
    #[error("Promo service unavailable: {0}")]
    Unavailable(#[source] ServiceError),
}

impl PromoError {
    /// Returns true if retrying the same code later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PromoError::Unavailable(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: ProductId::new(123),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 123: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "promo code".to_string(),
        };
        assert_eq!(err.to_string(), "promo code is required");

        let err = ValidationError::TooLong {
            field: "promo code".to_string(),
            max: 32,
        };
        assert_eq!(err.to_string(), "promo code must be at most 32 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_promo_error_retryability() {
        let unavailable = PromoError::Unavailable(ServiceError::unavailable("promo", "timeout"));
        assert!(unavailable.is_retryable());

        let rejected = PromoError::Rejected {
            code: "EXPIRED".to_string(),
            reason: "expired".to_string(),
        };
        assert!(!rejected.is_retryable());
    }
}
