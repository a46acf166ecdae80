use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ProviderSettings;
use core_types::{Interval, PriceRange, ProviderPayload};
use reqwest::Url;

pub mod coingecko;
pub mod error;
pub mod resolver;
pub mod yahoo;

// --- Public API ---
pub use coingecko::CoinGeckoClient;
pub use resolver::{StaticSymbolMap, SymbolResolver};
pub use yahoo::YahooClient;

/// The contract the analytics pipeline uses to obtain raw price history.
///
/// Implementations return the provider's payload untouched; turning it into a
/// canonical price series is the normalizer's job. Retries and rate limiting
/// belong behind this trait, never in the callers.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the raw history of `symbol` over `range` at `interval`.
    async fn fetch_history(
        &self,
        symbol: &str,
        range: PriceRange,
        interval: Interval,
    ) -> Result<ProviderPayload, ApiError>;
}

/// Builds the shared reqwest client used by every source.
pub(crate) fn build_http_client(settings: &ProviderSettings) -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Appends percent-encoded path segments to a provider base URL.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(format!("{} cannot carry path segments", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turns a non-success HTTP status into the matching `ApiError`.
pub(crate) fn classify_status(
    provider: &str,
    status: u16,
    retry_after: Option<&str>,
    description: Option<String>,
) -> ApiError {
    match status {
        429 => {
            let wait = retry_after
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(60);
            ApiError::RateLimited(format!(
                "{} allows a limited number of calls per minute. Please wait {} seconds and try again, or request fewer symbols.",
                provider, wait
            ))
        }
        404 => ApiError::NotFound(
            description.unwrap_or_else(|| format!("{} has no data for the requested symbol.", provider)),
        ),
        _ => ApiError::Status(
            description.unwrap_or_else(|| format!("{} responded with status {}", provider, status)),
        ),
    }
}
