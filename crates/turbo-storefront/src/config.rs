//! Storefront configuration.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use axum_extra::extract::cookie::Key;
use serde::{Deserialize, Serialize};
use turbo_commerce::cart::MAX_CART_LINE_QUANTITY;
use turbo_commerce::listing::PAGINATE_BY;
use turbo_commerce::{Currency, ExchangeRates};

/// Minimum length of a configured cookie secret.
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Longest accepted cart cookie lifetime.
pub const MAX_COOKIE_MAX_AGE_DAYS: i64 = 36_500;

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog presentation settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart cookie settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML file, or JSON when the extension is `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Resolve the runtime settings handlers read.
    pub fn settings(&self) -> Result<Settings> {
        let currency = Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown currency: {}", self.catalog.currency))?;

        let mut rates = ExchangeRates::new(currency);
        for (code, rate) in &self.catalog.exchange_rates {
            let target = Currency::from_code(code)
                .with_context(|| format!("Unknown exchange rate currency: {code}"))?;
            if !rate.is_finite() || *rate <= 0.0 {
                bail!("Exchange rate for {code} must be positive, got {rate}");
            }
            rates = rates.with_rate(target, *rate);
        }

        if self.catalog.paginate_by == 0 {
            bail!("catalog.paginate_by must be at least 1");
        }
        if self.catalog.max_cart_line_quantity < 1 {
            bail!("catalog.max_cart_line_quantity must be at least 1");
        }
        if !(1..=MAX_COOKIE_MAX_AGE_DAYS).contains(&self.cart.cookie_max_age_days) {
            bail!(
                "cart.cookie_max_age_days must be between 1 and {MAX_COOKIE_MAX_AGE_DAYS}, got {}",
                self.cart.cookie_max_age_days
            );
        }

        Ok(Settings {
            paginate_by: self.catalog.paginate_by,
            max_cart_line_quantity: self.catalog.max_cart_line_quantity,
            currency,
            exchange_rates: rates,
            cart_cookie_name: self.cart.cookie_name.clone(),
            cart_cookie_max_age_days: self.cart.cookie_max_age_days,
        })
    }

    /// Key used to sign the cart cookie.
    ///
    /// Without a configured secret a random key is generated, so cart
    /// cookies do not survive a restart.
    pub fn cookie_key(&self) -> Result<Key> {
        match self.cart.secret_key.as_deref() {
            Some(secret) if secret.len() >= MIN_SECRET_KEY_LEN => Ok(Key::derive_from(secret.as_bytes())),
            Some(_) => bail!("cart.secret_key must be at least {MIN_SECRET_KEY_LEN} bytes"),
            None => {
                tracing::warn!("cart.secret_key not set, generating an ephemeral key");
                Ok(Key::generate())
            }
        }
    }
}

/// Server listen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address: {}:{}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Catalog presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per listing page.
    #[serde(default = "default_paginate_by")]
    pub paginate_by: usize,

    /// Upper bound for a single cart line.
    #[serde(default = "default_max_cart_line_quantity")]
    pub max_cart_line_quantity: i64,

    /// ISO code of the store currency.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Units of each ISO currency per one unit of the store currency.
    #[serde(default)]
    pub exchange_rates: HashMap<String, f64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            paginate_by: default_paginate_by(),
            max_cart_line_quantity: default_max_cart_line_quantity(),
            currency: default_currency(),
            exchange_rates: HashMap::new(),
        }
    }
}

fn default_paginate_by() -> usize {
    PAGINATE_BY
}

fn default_max_cart_line_quantity() -> i64 {
    MAX_CART_LINE_QUANTITY
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Cart cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Secret for signing the cookie, at least 32 bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secret_key: None,
            cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}

fn default_cookie_name() -> String {
    "cart".to_string()
}

fn default_cookie_max_age_days() -> i64 {
    3650
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directives, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

/// Resolved settings shared with handlers.
#[derive(Debug, Clone)]
pub struct Settings {
    pub paginate_by: usize,
    pub max_cart_line_quantity: i64,
    pub currency: Currency,
    pub exchange_rates: ExchangeRates,
    pub cart_cookie_name: String,
    pub cart_cookie_max_age_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paginate_by: PAGINATE_BY,
            max_cart_line_quantity: MAX_CART_LINE_QUANTITY,
            currency: Currency::USD,
            exchange_rates: ExchangeRates::new(Currency::USD),
            cart_cookie_name: default_cookie_name(),
            cart_cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.catalog.paginate_by, 16);
        assert_eq!(config.catalog.max_cart_line_quantity, 50);
        assert_eq!(config.cart.cookie_name, "cart");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_settings_from_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            paginate_by = 8
            currency = "EUR"

            [catalog.exchange_rates]
            USD = 1.1
            PLN = 4.3

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.paginate_by, 8);
        assert_eq!(settings.currency, Currency::EUR);
        assert_eq!(settings.exchange_rates.base(), Currency::EUR);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_settings() {
        let mut config = StorefrontConfig::default();
        config.catalog.currency = "XYZ".into();
        assert!(config.settings().is_err());

        let mut config = StorefrontConfig::default();
        config.catalog.exchange_rates.insert("EUR".into(), -1.0);
        assert!(config.settings().is_err());

        let mut config = StorefrontConfig::default();
        config.catalog.paginate_by = 0;
        assert!(config.settings().is_err());
    }

    #[test]
    fn test_cookie_max_age_range() {
        let mut config = StorefrontConfig::default();
        for days in [0, -1, MAX_COOKIE_MAX_AGE_DAYS + 1, i64::MAX / 1000] {
            config.cart.cookie_max_age_days = days;
            assert!(config.settings().is_err(), "{days} days accepted");
        }

        config.cart.cookie_max_age_days = MAX_COOKIE_MAX_AGE_DAYS;
        assert_eq!(config.settings().unwrap().cart_cookie_max_age_days, MAX_COOKIE_MAX_AGE_DAYS);
    }

    #[test]
    fn test_cookie_key_secret_length() {
        let mut config = StorefrontConfig::default();
        config.cart.secret_key = Some("short".into());
        assert!(config.cookie_key().is_err());

        config.cart.secret_key = Some("x".repeat(MIN_SECRET_KEY_LEN));
        assert!(config.cookie_key().is_ok());

        config.cart.secret_key = None;
        assert!(config.cookie_key().is_ok());
    }
}
