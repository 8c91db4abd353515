//! # Store Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │       7% tax · $12.99 shipping · free at $100.00 · 800ms latency        │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  2. storefront.toml                                                     │
//! │       $ALASKA_CONFIG, else the platform config dir:                     │
//! │       ~/.config/alaska-marketplace/storefront.toml (Linux)              │
//! │       ~/Library/Application Support/com.alaska.marketplace/... (macOS)  │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  3. Environment (ALASKA_*)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # storefront.toml
//! store_name = "Alaska Marketplace"
//! service_latency_ms = 0
//!
//! [pricing]
//! tax_rate = 825              # basis points (8.25%)
//! shipping_fee = 1299         # cents
//! free_shipping_threshold = 10000
//! tax_base = "before_discount"
//! shipping_base = "after_discount"
//! ```
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use market_core::{Money, PricingConfig, TaxRate, ValidationError};
use market_data::fixtures::SIMULATED_LATENCY_MS;

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name (shown in the page header and logs)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Simulated delay on catalog and promo calls, in milliseconds
    pub service_latency_ms: u64,

    /// Tax, shipping and discount policy
    pub pricing: PricingConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Alaska Marketplace".to_string(),
            currency_symbol: "$".to_string(),
            service_latency_ms: SIMULATED_LATENCY_MS,
            pricing: PricingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with `lookup` standing in for the process
    /// environment, both for `ALASKA_CONFIG` and the overrides.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .or_else(|| lookup("ALASKA_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup)?;
        config.pricing.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `ALASKA_*` overrides read through `lookup`.
    ///
    /// ## Variables
    /// - `ALASKA_STORE_NAME`
    /// - `ALASKA_TAX_RATE`: percent, e.g. `"8.25"`
    /// - `ALASKA_SHIPPING_FEE`, `ALASKA_FREE_SHIPPING_THRESHOLD`: dollars, e.g. `"12.99"`
    /// - `ALASKA_TAX_BASE`, `ALASKA_SHIPPING_BASE`: `before_discount` / `after_discount`
    /// - `ALASKA_SERVICE_LATENCY_MS`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("ALASKA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(rate) = lookup("ALASKA_TAX_RATE") {
            self.pricing.tax_rate =
                TaxRate::parse_percentage(&rate).map_err(invalid("ALASKA_TAX_RATE"))?;
            debug!(bps = self.pricing.tax_rate.bps(), "Overriding tax rate from environment");
        }

        if let Some(fee) = lookup("ALASKA_SHIPPING_FEE") {
            self.pricing.shipping_fee =
                fee.parse::<Money>().map_err(invalid("ALASKA_SHIPPING_FEE"))?;
        }

        if let Some(threshold) = lookup("ALASKA_FREE_SHIPPING_THRESHOLD") {
            self.pricing.free_shipping_threshold = threshold
                .parse::<Money>()
                .map_err(invalid("ALASKA_FREE_SHIPPING_THRESHOLD"))?;
        }

        if let Some(base) = lookup("ALASKA_TAX_BASE") {
            self.pricing.tax_base = base.parse().map_err(invalid("ALASKA_TAX_BASE"))?;
        }

        if let Some(base) = lookup("ALASKA_SHIPPING_BASE") {
            self.pricing.shipping_base = base.parse().map_err(invalid("ALASKA_SHIPPING_BASE"))?;
        }

        if let Some(ms) = lookup("ALASKA_SERVICE_LATENCY_MS") {
            self.service_latency_ms = ms.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "ALASKA_SERVICE_LATENCY_MS".to_string(),
                reason: format!("'{}' is not a whole number of milliseconds", ms),
            })?;
        }

        Ok(())
    }

    pub fn service_latency(&self) -> Duration {
        Duration::from_millis(self.service_latency_ms)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "alaska", "marketplace")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

fn invalid(key: &'static str) -> impl Fn(ValidationError) -> ConfigError {
    move |err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: err.to_string(),
    }
}
