use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AssetClassSettings, Config, EngineSettings, LoggingSettings, ProviderSettings, ServerSettings,
};

/// Loads the application configuration.
///
/// The TOML file at `path` is optional; values from `PRISM__`-prefixed environment
/// variables (e.g. `PRISM__ENGINE__ROLLING_WINDOW=60`) are layered on top of it. The
/// result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("PRISM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

/// Parses configuration from an in-memory TOML document.
pub fn config_from_toml(contents: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AssetClass, PriceRange};
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = config_from_toml("").unwrap();
        assert_eq!(config.engine.rolling_window, 30);
        assert_eq!(config.engine.min_regression_sample, 20);
        assert_eq!(config.asset_class(AssetClass::Equity).periods_per_year, 252.0);
        assert_eq!(config.asset_class(AssetClass::Crypto).periods_per_year, 365.0);
        assert_eq!(config.crypto.default_range, PriceRange::SixMonths);
        assert_eq!(config.providers.request_timeout, Duration::from_secs(20));
    }

    #[test]
    fn sections_override_defaults() {
        let config = config_from_toml(
            r#"
            [engine]
            rolling_window = 60

            [crypto]
            periods_per_year = 360
            default_range = "3mo"
            max_history_days = 90

            [providers]
            request_timeout = "5s"

            [symbol_ids]
            BTC = "bitcoin"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.rolling_window, 60);
        assert_eq!(config.engine.max_scatter_points, 400);
        assert_eq!(config.crypto.periods_per_year, 360.0);
        assert_eq!(config.crypto.default_range, PriceRange::ThreeMonths);
        assert_eq!(config.crypto.max_history_days, Some(90));
        assert_eq!(config.providers.request_timeout, Duration::from_secs(5));
        assert_eq!(config.symbol_ids.len(), 1);
    }

    #[test]
    fn partial_sections_keep_asset_class_defaults() {
        let config = config_from_toml("[crypto]\nperiods_per_year = 360\n").unwrap();
        assert_eq!(config.crypto.periods_per_year, 360.0);
        assert_eq!(config.crypto.default_range, PriceRange::SixMonths);
        assert_eq!(config.crypto.max_history_days, Some(365));
        assert!(!config.crypto.price_correlation);

        let config = config_from_toml("[equity]\nperiods_per_year = 250\n").unwrap();
        assert!(config.equity.price_correlation);
        assert_eq!(config.equity.default_range, PriceRange::OneYear);

        let config = config_from_toml("[crypto]\ndefault_range = \"3mo\"\n").unwrap();
        assert_eq!(config.crypto.default_range, PriceRange::ThreeMonths);
        assert_eq!(config.crypto.periods_per_year, 365.0);
        assert_eq!(config.crypto.max_history_days, Some(365));
    }

    #[test]
    fn environment_overrides_the_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[engine]\nrolling_window = 45\nmax_scatter_points = 250\n\n[crypto]\ndefault_range = \"1y\"\n"
        )
        .unwrap();

        // No other test reads these variables.
        unsafe {
            std::env::set_var("PRISM__ENGINE__ROLLING_WINDOW", "60");
            std::env::set_var("PRISM__CRYPTO__MAX_HISTORY_DAYS", "90");
        }
        let loaded = load_config(file.path());
        unsafe {
            std::env::remove_var("PRISM__ENGINE__ROLLING_WINDOW");
            std::env::remove_var("PRISM__CRYPTO__MAX_HISTORY_DAYS");
        }
        let config = loaded.unwrap();

        assert_eq!(config.engine.rolling_window, 60);
        assert_eq!(config.engine.max_scatter_points, 250);
        assert_eq!(config.crypto.max_history_days, Some(90));
        assert_eq!(config.crypto.default_range, PriceRange::OneYear);
        assert_eq!(config.crypto.periods_per_year, 365.0);
        assert_eq!(config.equity, Config::default().equity);
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let err = config_from_toml("[engine]\nrolling_window = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn non_positive_annualization_is_rejected() {
        let err = config_from_toml("[equity]\nperiods_per_year = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
