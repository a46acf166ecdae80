use crate::error::ApiError;
use crate::{PriceSource, build_http_client, classify_status, endpoint};
use async_trait::async_trait;
use configuration::ProviderSettings;
use core_types::payload::ChartResponse;
use core_types::{Interval, PriceRange, ProviderPayload};
use reqwest::header::{ACCEPT, RETRY_AFTER};

const PROVIDER: &str = "Yahoo Finance";

/// Daily bars from the Yahoo Finance chart endpoint, keyed directly on exchange tickers.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(settings)?,
            base_url: settings.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        range: PriceRange,
        interval: Interval,
    ) -> Result<ProviderPayload, ApiError> {
        let url = endpoint(&self.base_url, &[symbol])?;
        tracing::debug!(%symbol, %range, "Requesting chart from {}.", PROVIDER);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("range", range.as_str()),
                ("interval", interval.as_str()),
                ("includePrePost", "false"),
                ("events", "div,splits"),
                ("includeAdjustedClose", "true"),
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
            // Yahoo explains most failures (unknown ticker, delisted) in the chart error body.
            let description = serde_json::from_str::<ChartResponse>(&text)
                .ok()
                .and_then(|body| body.chart)
                .and_then(|chart| chart.error)
                .and_then(|error| error.description);
            return Err(classify_status(
                PROVIDER,
                status.as_u16(),
                retry_after.as_deref(),
                description,
            ));
        }

        let body = serde_json::from_str::<ChartResponse>(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(ProviderPayload::Chart(body))
    }
}
