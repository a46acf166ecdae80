//! Raw response shapes of the market-data providers.
//!
//! These mirror what the providers put on the wire, with every field optional so that a
//! malformed body still deserializes and can be rejected with a meaningful message by the
//! normalizer instead of a serde error.

use serde::Deserialize;

/// A provider response, tagged by the shape it arrived in.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    /// Timestamp + parallel OHLCV arrays (`/v8/finance/chart/{symbol}`).
    Chart(ChartResponse),
    /// `[timestamp_ms, value]` pair lists (`/coins/{id}/market_chart`).
    MarketChart(MarketChartResponse),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub chart: Option<ChartEnvelope>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Option<Vec<ChartQuote>>,
}

/// Parallel arrays aligned with `ChartResult::timestamp`; gaps arrive as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_ms, price]`
    #[serde(default)]
    pub prices: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub total_volumes: Option<Vec<[f64; 2]>>,
    /// Present on some error bodies instead of the series.
    #[serde(default)]
    pub error: Option<String>,
}
