use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `PRISM__*` variable could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// Parsed fine, but a value makes no sense (e.g. a rolling window of 1).
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
