use core_types::{AssetClass, PriceRange};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` still
/// produces a usable configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default = "AssetClassSettings::equity", deserialize_with = "equity_section")]
    pub equity: AssetClassSettings,
    #[serde(default = "AssetClassSettings::crypto", deserialize_with = "crypto_section")]
    pub crypto: AssetClassSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    /// Ticker -> provider id lookup used by sources that do not key on tickers.
    #[serde(default)]
    pub symbol_ids: HashMap<String, String>,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            equity: AssetClassSettings::equity(),
            crypto: AssetClassSettings::crypto(),
            providers: ProviderSettings::default(),
            symbol_ids: HashMap::new(),
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Returns the settings block that applies to `asset_class`.
    pub fn asset_class(&self, asset_class: AssetClass) -> &AssetClassSettings {
        match asset_class {
            AssetClass::Equity => &self.equity,
            AssetClass::Crypto => &self.crypto,
        }
    }

    /// Rejects values the analytics engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.rolling_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "engine.rolling_window must be at least 2, got {}",
                self.engine.rolling_window
            )));
        }
        if self.engine.min_regression_sample < 2 {
            return Err(ConfigError::ValidationError(format!(
                "engine.min_regression_sample must be at least 2, got {}",
                self.engine.min_regression_sample
            )));
        }
        if self.engine.max_scatter_points < 2 {
            return Err(ConfigError::ValidationError(format!(
                "engine.max_scatter_points must be at least 2, got {}",
                self.engine.max_scatter_points
            )));
        }
        for (name, settings) in [("equity", &self.equity), ("crypto", &self.crypto)] {
            if !(settings.periods_per_year.is_finite() && settings.periods_per_year > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{}.periods_per_year must be a positive number, got {}",
                    name, settings.periods_per_year
                )));
            }
            if settings.max_history_days == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "{}.max_history_days must be positive when set",
                    name
                )));
            }
        }
        if self.providers.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "providers.request_timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters shared by every asset class.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Observations per rolling-correlation window.
    pub rolling_window: usize,
    /// Pairs with fewer aligned returns are left out of the regression output.
    pub min_regression_sample: usize,
    /// Upper bound on scatter points handed to the charts.
    pub max_scatter_points: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rolling_window: 30,
            min_regression_sample: 20,
            max_scatter_points: 400,
        }
    }
}

/// Parameters that differ between equity and crypto markets.
///
/// A `[equity]`/`[crypto]` section only lists the keys it changes; the rest keep
/// that asset class's own defaults (see `equity()` and `crypto()`).
#[derive(Debug, Clone, PartialEq)]
pub struct AssetClassSettings {
    /// Trading periods in a year; 252 for exchange sessions, 365 for 24/7 markets.
    pub periods_per_year: f64,
    /// Also correlate raw price levels over the aligned price axis.
    pub price_correlation: bool,
    pub default_range: PriceRange,
    /// Provider cap on the number of days of history that may be requested.
    pub max_history_days: Option<u32>,
}

impl AssetClassSettings {
    pub fn equity() -> Self {
        Self {
            periods_per_year: 252.0,
            price_correlation: true,
            default_range: PriceRange::OneYear,
            max_history_days: None,
        }
    }

    pub fn crypto() -> Self {
        Self {
            periods_per_year: 365.0,
            price_correlation: false,
            default_range: PriceRange::SixMonths,
            max_history_days: Some(365),
        }
    }

    fn overlay(mut self, section: AssetClassSection) -> Self {
        if let Some(periods_per_year) = section.periods_per_year {
            self.periods_per_year = periods_per_year;
        }
        if let Some(price_correlation) = section.price_correlation {
            self.price_correlation = price_correlation;
        }
        if let Some(default_range) = section.default_range {
            self.default_range = default_range;
        }
        if section.max_history_days.is_some() {
            self.max_history_days = section.max_history_days;
        }
        self
    }
}

/// The keys an asset-class section may set, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AssetClassSection {
    periods_per_year: Option<f64>,
    price_correlation: Option<bool>,
    default_range: Option<PriceRange>,
    max_history_days: Option<u32>,
}

fn equity_section<'de, D>(deserializer: D) -> Result<AssetClassSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let section = AssetClassSection::deserialize(deserializer)?;
    Ok(AssetClassSettings::equity().overlay(section))
}

fn crypto_section<'de, D>(deserializer: D) -> Result<AssetClassSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let section = AssetClassSection::deserialize(deserializer)?;
    Ok(AssetClassSettings::crypto().overlay(section))
}

/// Endpoints and HTTP behaviour of the market-data providers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub yahoo_base_url: String,
    pub coingecko_base_url: String,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            yahoo_base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
            request_timeout: Duration::from_secs(20),
            user_agent: "prism-analytics/0.1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}
