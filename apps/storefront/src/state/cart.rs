//! # Cart State
//!
//! Holds one shopper's cart for the lifetime of their session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands may touch the same cart concurrently
//! 2. Only one of them may mutate it at a time
//! 3. Every lock is held for one synchronous store call, never across an await
//!
//! ## Promo Codes Without Blocking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_promo_code("NORTH10")            change_quantity(line, +1)       │
//! │         │                                        │                      │
//! │         ▼                                        │                      │
//! │  redeem() ── awaiting promo service ──┐          ▼                      │
//! │         (no lock held)                │   lock ► +1 ► unlock            │
//! │                                       ▼                                 │
//! │                          lock ► apply_promo ► unlock                    │
//! │                                                                         │
//! │  The discount is a shape (10%), so it applies to whatever the           │
//! │  subtotal is when totals are next read.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use market_core::promo::redeem;
use market_core::{AppliedPromo, CartStore, PricingConfig, PromoError, PromoValidator};

/// Session-scoped cart state.
///
/// Cloning shares the same cart; each new session gets its own via
/// [`CartState::new`].
#[derive(Debug, Clone)]
pub struct CartState {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    cart: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Creates a new session with an empty cart.
    pub fn new(pricing: PricingConfig) -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, "Cart session started");
        CartState {
            session_id,
            started_at: Utc::now(),
            cart: Arc::new(Mutex::new(CartStore::new(pricing))),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let line = cart_state.with_cart_mut(|cart| cart.add_item(item));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Redeems `raw` with `validator` and records it on the cart.
    ///
    /// The lock is only taken after the promo service has answered. On any
    /// error the cart, including a previously applied promo, is unchanged.
    pub async fn apply_promo_code(
        &self,
        validator: &dyn PromoValidator,
        raw: &str,
    ) -> Result<AppliedPromo, PromoError> {
        let applied = redeem(validator, raw).await?;
        self.with_cart_mut(|cart| cart.apply_promo(applied.clone()));
        info!(session_id = %self.session_id, code = %applied.code, "Promo code applied");
        Ok(applied)
    }
}
