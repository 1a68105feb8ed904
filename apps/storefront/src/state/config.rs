//! # Store Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MANGO_*`)
//! 2. Config file (`--config <path>`, else `<config dir>/config.toml` if present)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mango_core::{Money, FREE_SHIPPING_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StoreConfig {
    /// Shown in the shell banner.
    pub store_name: String,

    /// Currency symbol used when rendering prices.
    pub currency_symbol: String,

    /// Orders at or above this amount (in cents) ship free.
    pub free_shipping_threshold_cents: i64,

    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Store: "Mango Grove"
    /// - Currency: $
    /// - Free shipping: $75.00
    /// - Catalog: built-in
    fn default() -> Self {
        StoreConfig {
            store_name: "Mango Grove".to_string(),
            currency_symbol: "$".to_string(),
            free_shipping_threshold_cents: FREE_SHIPPING_THRESHOLD.cents(),
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from every source.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => StoreConfig::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => StoreConfig::from_file(&path)?,
                _ => StoreConfig::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&contents).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Config file loaded");
        Ok(config)
    }

    /// Applies `MANGO_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `MANGO_STORE_NAME`: Override store name
    /// - `MANGO_CURRENCY_SYMBOL`: Override currency symbol
    /// - `MANGO_FREE_SHIPPING`: Free shipping threshold in dollars (e.g., "50" or "49.99")
    /// - `MANGO_CATALOG`: Path to a JSON catalog
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup("MANGO_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(symbol) = lookup("MANGO_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(threshold) = lookup("MANGO_FREE_SHIPPING") {
            match threshold.trim().parse::<f64>().ok().and_then(Money::from_decimal) {
                Some(money) if !money.is_negative() => {
                    self.free_shipping_threshold_cents = money.cents();
                }
                _ => warn!(value = %threshold, "Ignoring invalid MANGO_FREE_SHIPPING"),
            }
        }

        if let Some(catalog) = lookup("MANGO_CATALOG") {
            self.catalog_path = Some(PathBuf::from(catalog));
        }
    }

    pub fn free_shipping_threshold(&self) -> Money {
        Money::from_cents(self.free_shipping_threshold_cents)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::Money;
    /// use mango_storefront::state::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

/// `config.toml` in the platform config directory.
///
/// - **Linux**: `~/.config/storefront/config.toml`
/// - **macOS**: `~/Library/Application Support/com.mango.storefront/config.toml`
/// - **Windows**: `%APPDATA%\mango\storefront\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "mango", "storefront").map(|dirs| dirs.config_dir().join("config.toml"))
}
