//! # State Module
//!
//! Session and configuration state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │       CartState          │        │      StoreConfig         │      │
//! │  │                          │        │                          │      │
//! │  │  session_id (Uuid)       │        │  store_name              │      │
//! │  │  Arc<Mutex<CartStore>>   │        │  currency_symbol         │      │
//! │  │                          │        │  pricing (PricingConfig) │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Arc<Mutex<T>>, one short lock per store call             │
//! │  • StoreConfig: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::{ConfigError, StoreConfig};
