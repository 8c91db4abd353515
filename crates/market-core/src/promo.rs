//! # Promo Codes
//!
//! Types and the port for redeeming promo codes against an external
//! promo/discount service.
//!
//! ## Redemption Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Applying a Promo Code                                │
//! │                                                                         │
//! │  "  north10 "                                                           │
//! │      │                                                                  │
//! │      ▼  PromoCode::parse  ── blank / malformed ──► PromoError::Validation│
//! │  PromoCode("NORTH10")           (service never called)                  │
//! │      │                                                                  │
//! │      ▼  PromoValidator::validate  (async, cart NOT borrowed)            │
//! │      │    ├── Err(ServiceError) ──────────────► PromoError::Unavailable │
//! │      │    ├── valid: false ───────────────────► PromoError::Rejected    │
//! │      │    └── valid: true, discount ──┐                                 │
//! │      ▼                                ▼                                 │
//! │  AppliedPromo ──► CartStore::apply_promo (sync, replaces any previous) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Splitting redemption from recording is what keeps a slow promo service
//! from blocking quantity changes on the same cart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{PromoError, ServiceResult};
use crate::money::Money;
use crate::validation::{
    validate_discount_bps, validate_price_cents, validate_promo_code, ValidationResult,
};

// =============================================================================
// Promo Code
// =============================================================================

/// A promo code that passed local validation.
///
/// Codes are trimmed and upper-cased, so `" north10"` and `"NORTH10"` are
/// the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromoCode(String);

impl PromoCode {
    /// Validates raw user input. Blank or malformed input is refused here,
    /// before any external call.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let code = validate_promo_code(raw)?;
        Ok(PromoCode(code.to_ascii_uppercase()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Promo Discount
// =============================================================================

/// The shape of a discount returned by the promo service.
///
/// The cart stores the shape, not the amount, so a percentage follows the
/// subtotal as lines change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PromoDiscount {
    /// A fixed amount off the order.
    Amount(Money),
    /// A percentage off the subtotal, in basis points (1000 = 10%).
    Percent(u32),
}

impl PromoDiscount {
    /// Checks the shape is sane: no negative amounts, no more than 100% off.
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            PromoDiscount::Amount(amount) => validate_price_cents(amount.cents()),
            PromoDiscount::Percent(bps) => validate_discount_bps(*bps),
        }
    }

    /// How much this discount takes off `subtotal`.
    ///
    /// Never more than the subtotal itself, so a discount cannot push the
    /// order below zero.
    ///
    /// ```rust
    /// use market_core::money::Money;
    /// use market_core::promo::PromoDiscount;
    ///
    /// let subtotal = Money::from_cents(3000);
    /// assert_eq!(PromoDiscount::Percent(1000).amount_off(subtotal).cents(), 300);
    /// let fixed = PromoDiscount::Amount(Money::from_cents(5000));
    /// assert_eq!(fixed.amount_off(subtotal).cents(), 3000);
    /// ```
    pub fn amount_off(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() {
            return Money::zero();
        }
        let raw = match self {
            PromoDiscount::Amount(amount) => *amount,
            PromoDiscount::Percent(bps) => subtotal.percentage(*bps),
        };
        raw.clamp(Money::zero(), subtotal)
    }
}

// =============================================================================
// Promo Decision
// =============================================================================

/// What the promo service said about a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoDecision {
    pub valid: bool,
    /// Present when `valid` is true.
    pub discount: Option<PromoDiscount>,
    /// Human-readable label ("10% off your order") or rejection reason.
    pub message: Option<String>,
}

impl PromoDecision {
    pub fn accept(discount: PromoDiscount, message: impl Into<String>) -> Self {
        PromoDecision {
            valid: true,
            discount: Some(discount),
            message: Some(message.into()),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        PromoDecision {
            valid: false,
            discount: None,
            message: Some(reason.into()),
        }
    }
}

// =============================================================================
// Applied Promo
// =============================================================================

/// A promo recorded on a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPromo {
    pub code: String,
    pub discount: PromoDiscount,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub applied_at: DateTime<Utc>,
}

// =============================================================================
// Promo Validator Port
// =============================================================================

/// The external promo/discount service.
///
/// Implementations may be slow or unreachable. Report outages as
/// `Err(ServiceError)`, and refusals as `Ok` with `valid: false`.
#[async_trait]
pub trait PromoValidator: Send + Sync {
    async fn validate(&self, code: &PromoCode) -> ServiceResult<PromoDecision>;
}

/// Validates `raw` locally, asks `validator`, and turns a positive answer
/// into an [`AppliedPromo`] ready to record on a cart.
///
/// Does not touch any cart, so callers can await it without holding a lock.
pub async fn redeem(validator: &dyn PromoValidator, raw: &str) -> Result<AppliedPromo, PromoError> {
    let code = PromoCode::parse(raw)?;

    let decision = validator
        .validate(&code)
        .await
        .map_err(PromoError::Unavailable)?;

    let rejected = |reason: String| PromoError::Rejected {
        code: code.to_string(),
        reason,
    };

    if !decision.valid {
        return Err(rejected(
            decision
                .message
                .unwrap_or_else(|| "code is not valid".to_string()),
        ));
    }

    let discount = decision
        .discount
        .ok_or_else(|| rejected("promo carries no discount".to_string()))?;
    discount
        .validate()
        .map_err(|e| rejected(format!("promo service returned an unusable discount: {}", e)))?;

    Ok(AppliedPromo {
        code: code.to_string(),
        discount,
        description: decision.message,
        applied_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every code with the same canned response and counts calls.
    struct Canned {
        answer: ServiceResult<PromoDecision>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(answer: ServiceResult<PromoDecision>) -> Self {
            Canned {
                answer,
                calls: AtomicUsize::new(0),
            }
        }

        fn accepting(discount: PromoDiscount, message: &str) -> Self {
            Self::new(Ok(PromoDecision::accept(discount, message)))
        }
    }

    #[async_trait]
    impl PromoValidator for Canned {
        async fn validate(&self, _code: &PromoCode) -> ServiceResult<PromoDecision> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[test]
    fn test_promo_code_normalizes() {
        let code = PromoCode::parse("  north10 ").unwrap();
        assert_eq!(code.as_str(), "NORTH10");
        assert!(PromoCode::parse("").is_err());
    }

    #[test]
    fn test_amount_off_caps_at_subtotal() {
        let subtotal = Money::from_cents(2000);
        assert_eq!(PromoDiscount::Amount(Money::from_cents(500)).amount_off(subtotal).cents(), 500);
        let fixed = PromoDiscount::Amount(Money::from_cents(5000));
        assert_eq!(fixed.amount_off(subtotal).cents(), 2000);
        assert_eq!(PromoDiscount::Percent(10000).amount_off(subtotal).cents(), 2000);
        assert_eq!(PromoDiscount::Percent(1000).amount_off(Money::zero()).cents(), 0);
    }

    #[test]
    fn test_discount_serialization_shape() {
        let json = serde_json::to_value(PromoDiscount::Percent(1000)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "percent", "value": 1000 }));
    }

    #[tokio::test]
    async fn test_redeem_valid_code() {
        let validator = Canned::accepting(PromoDiscount::Percent(1000), "10% off");
        let applied = redeem(&validator, " north10").await.unwrap();
        assert_eq!(applied.code, "NORTH10");
        assert_eq!(applied.discount, PromoDiscount::Percent(1000));
        assert_eq!(applied.description.as_deref(), Some("10% off"));
    }

    #[tokio::test]
    async fn test_blank_code_never_reaches_service() {
        let validator = Canned::accepting(PromoDiscount::Percent(1000), "10% off");
        let err = redeem(&validator, "   ").await.unwrap_err();
        assert!(matches!(err, PromoError::Validation(_)));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejection_and_outage_are_distinct() {
        let rejecting = Canned::new(Ok(PromoDecision::reject("code has expired")));
        match redeem(&rejecting, "OLD").await.unwrap_err() {
            PromoError::Rejected { code, reason } => {
                assert_eq!(code, "OLD");
                assert_eq!(reason, "code has expired");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let down = Canned::new(Err(ServiceError::unavailable(
            "promo service",
            "connection refused",
        )));
        let err = redeem(&down, "NORTH10").await.unwrap_err();
        assert!(matches!(err, PromoError::Unavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_valid_without_discount_is_rejected() {
        let odd = Canned::new(Ok(PromoDecision {
            valid: true,
            discount: None,
            message: None,
        }));
        assert!(matches!(
            redeem(&odd, "EMPTY").await.unwrap_err(),
            PromoError::Rejected { .. }
        ));

        let too_generous = Canned::accepting(PromoDiscount::Percent(20000), "200% off");
        assert!(matches!(
            redeem(&too_generous, "HUGE").await.unwrap_err(),
            PromoError::Rejected { .. }
        ));
    }
}
