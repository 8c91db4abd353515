//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function → Result<CartResponse, ApiError>                     │
//! │         │                                                               │
//! │         ├── ValidationError ─────────────► VALIDATION_ERROR            │
//! │         ├── CoreError::ProductNotFound ──► NOT_FOUND                   │
//! │         ├── CoreError::InsufficientStock ► INSUFFICIENT_STOCK          │
//! │         ├── CoreError::CatalogUnavailable ┐                            │
//! │         ├── PromoError::Unavailable ──────┴► SERVICE_UNAVAILABLE       │
//! │         └── PromoError::Rejected ────────► PROMO_REJECTED              │
//! │                                                                         │
//! │  SERVICE_UNAVAILABLE is the only code worth retrying.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use market_core::{CoreError, PromoError, ValidationError};

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PROMO_REJECTED",
///   "message": "Promo code AURORA25 was rejected: code has expired"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product does not exist in the catalog
    NotFound,

    /// Input validation failed; nothing changed
    ValidationError,

    /// A collaborator could not be reached; retry later
    ServiceUnavailable,

    /// Requested quantity exceeds catalog stock
    InsufficientStock,

    /// The promo service refused the code
    PromoRejected,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Whether the UI should offer a retry.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::ServiceUnavailable
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog-backed cart errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                ApiError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            CoreError::CatalogUnavailable(e) => {
                tracing::warn!("Catalog lookup failed: {}", e);
                ApiError::new(
                    ErrorCode::ServiceUnavailable,
                    "The catalog is unavailable right now. Please try again.",
                )
            }
            CoreError::InsufficientStock { available, .. } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!("Only {} left in stock", available),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts promo failures to API errors.
impl From<PromoError> for ApiError {
    fn from(err: PromoError) -> Self {
        match err {
            PromoError::Validation(e) => e.into(),
            PromoError::Rejected { .. } => ApiError::new(ErrorCode::PromoRejected, err.to_string()),
            PromoError::Unavailable(e) => {
                tracing::warn!("Promo validation failed: {}", e);
                ApiError::new(
                    ErrorCode::ServiceUnavailable,
                    "Promo codes can't be checked right now. Please try again.",
                )
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::{ProductId, ServiceError};

    #[test]
    fn test_serializes_screaming_snake_code() {
        let err = ApiError::new(ErrorCode::PromoRejected, "nope");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "PROMO_REJECTED");
        assert_eq!(json["message"], "nope");
    }

    #[test]
    fn test_not_found_and_unavailable_are_distinct() {
        let missing: ApiError = CoreError::ProductNotFound(ProductId::new(7)).into();
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert!(!missing.is_retryable());

        let down: ApiError =
            CoreError::CatalogUnavailable(ServiceError::unavailable("catalog", "timeout")).into();
        assert_eq!(down.code, ErrorCode::ServiceUnavailable);
        assert!(down.is_retryable());
    }

    #[test]
    fn test_promo_errors_map_to_codes() {
        let rejected: ApiError = PromoError::Rejected {
            code: "AURORA25".to_string(),
            reason: "code has expired".to_string(),
        }
        .into();
        assert_eq!(rejected.code, ErrorCode::PromoRejected);
        assert!(rejected.message.contains("code has expired"));

        let blank: ApiError = PromoError::Validation(ValidationError::Required {
            field: "promo code".to_string(),
        })
        .into();
        assert_eq!(blank.code, ErrorCode::ValidationError);
    }
}
