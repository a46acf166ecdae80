use crate::error::ApiError;
use crate::resolver::SymbolResolver;
use crate::{PriceSource, build_http_client, classify_status, endpoint};
use async_trait::async_trait;
use configuration::ProviderSettings;
use core_types::payload::MarketChartResponse;
use core_types::{Interval, PriceRange, ProviderPayload};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use std::sync::Arc;

const PROVIDER: &str = "CoinGecko";

/// Daily USD prices from the CoinGecko market-chart endpoint.
///
/// CoinGecko keys assets on its own ids, so tickers go through the injected
/// `SymbolResolver` first.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    resolver: Arc<dyn SymbolResolver>,
    max_history_days: Option<u32>,
}

impl CoinGeckoClient {
    pub fn new(
        settings: &ProviderSettings,
        resolver: Arc<dyn SymbolResolver>,
        max_history_days: Option<u32>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(settings)?,
            base_url: settings.coingecko_base_url.trim_end_matches('/').to_string(),
            resolver,
            max_history_days,
        })
    }

    /// Number of days to request for `range`, kept inside `[1, max_history_days]`.
    pub fn days_for(&self, range: PriceRange) -> u32 {
        clamp_days(range.days(), self.max_history_days)
    }
}

fn clamp_days(days: u32, max_history_days: Option<u32>) -> u32 {
    let capped = match max_history_days {
        Some(max) => days.min(max),
        None => days,
    };
    capped.max(1)
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        range: PriceRange,
        _interval: Interval,
    ) -> Result<ProviderPayload, ApiError> {
        let coin_id = self.resolver.resolve(symbol);
        let days = self.days_for(range);
        let url = endpoint(&self.base_url, &["coins", coin_id.as_str(), "market_chart"])?;
        tracing::debug!(%symbol, %coin_id, days, "Requesting market chart from {}.", PROVIDER);

        let days_param = days.to_string();
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("vs_currency", "usd"),
                ("days", days_param.as_str()),
                ("interval", "daily"),
            ])
            .send()
            .await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !status.is_success() {
            let description = match status.as_u16() {
                404 => Some(format!(
                    "Asset '{}' ({}) not found. Please check the symbol.",
                    symbol, coin_id
                )),
                _ => serde_json::from_str::<MarketChartResponse>(&text)
                    .ok()
                    .and_then(|body| body.error),
            };
            return Err(classify_status(
                PROVIDER,
                status.as_u16(),
                retry_after.as_deref(),
                description,
            ));
        }

        let body = serde_json::from_str::<MarketChartResponse>(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(ProviderPayload::MarketChart(body))
    }
}
