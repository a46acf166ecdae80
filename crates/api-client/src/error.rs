use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Status(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}
