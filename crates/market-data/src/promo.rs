//! # Promo Rule Set
//!
//! A [`PromoValidator`] that decides codes from a table of rules.
//!
//! ## Decisions
//! | Code state        | Answer                                   |
//! |-------------------|------------------------------------------|
//! | Unknown           | `valid: false`, "code not recognized"    |
//! | Known, inactive   | `valid: false`, "code has expired"       |
//! | Known, active     | `valid: true` with the rule's discount   |
//! | Service offline   | `Err(ServiceError::Unavailable)`         |

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use market_core::error::{ServiceError, ServiceResult};
use market_core::{PromoCode, PromoDecision, PromoDiscount, PromoValidator};

use crate::fixtures;

const SERVICE: &str = "promo service";

/// One redeemable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoRule {
    pub discount: PromoDiscount,
    pub description: String,
    /// Inactive codes are recognized but refused.
    pub active: bool,
}

/// In-memory promo service keyed by upper-case code.
#[derive(Debug)]
pub struct PromoRuleSet {
    rules: HashMap<String, PromoRule>,
    available: AtomicBool,
    latency: Duration,
}

impl PromoRuleSet {
    pub fn new() -> Self {
        PromoRuleSet {
            rules: HashMap::new(),
            available: AtomicBool::new(true),
            latency: Duration::ZERO,
        }
    }

    /// Creates a rule set holding every code in [`fixtures::PROMOS`].
    pub fn seeded() -> Self {
        fixtures::PROMOS.iter().fold(Self::new(), |rules, promo| {
            rules.with_rule(
                promo.code,
                PromoRule {
                    discount: promo.discount,
                    description: promo.description.to_string(),
                    active: promo.active,
                },
            )
        })
    }

    /// Adds or replaces the rule for `code`.
    pub fn with_rule(mut self, code: &str, rule: PromoRule) -> Self {
        self.rules.insert(code.trim().to_ascii_uppercase(), rule);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Simulates the promo service going down or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn decide(&self, code: &PromoCode) -> PromoDecision {
        match self.rules.get(code.as_str()) {
            None => PromoDecision::reject("code not recognized"),
            Some(rule) if !rule.active => PromoDecision::reject("code has expired"),
            Some(rule) => PromoDecision::accept(rule.discount, rule.description.clone()),
        }
    }
}

impl Default for PromoRuleSet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromoValidator for PromoRuleSet {
    async fn validate(&self, code: &PromoCode) -> ServiceResult<PromoDecision> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            warn!(code = %code, "Promo validation failed: service unavailable");
            return Err(ServiceError::unavailable(SERVICE, "service is offline"));
        }

        let decision = self.decide(code);
        debug!(code = %code, valid = decision.valid, "Promo code checked");
        Ok(decision)
    }
}
