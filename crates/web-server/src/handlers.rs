use crate::{AppState, AssetDesk, error::AppError};
use analytics::BatchResult;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use core_types::{Interval, PriceRange};
use orchestrator::BatchRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of both metrics endpoints. `range` and `interval` fall back to the asset
/// class defaults when omitted.
#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    #[serde(default)]
    pub symbols: Vec<String>,
    pub range: Option<String>,
    pub interval: Option<String>,
}

/// `{ "success": true, ...BatchResult }`
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: BatchResult,
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # POST /api/finance/stocks/metrics
pub async fn stock_metrics(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    analyse(&state.equity, body?.0).await
}

/// # POST /api/finance/crypto/metrics
pub async fn crypto_metrics(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    analyse(&state.crypto, body?.0).await
}

async fn analyse(desk: &AssetDesk, body: MetricsRequest) -> Result<Json<MetricsResponse>, AppError> {
    let range = match body.range.as_deref() {
        Some(range) => range.parse::<PriceRange>()?,
        None => desk.default_range,
    };
    let interval = match body.interval.as_deref() {
        Some(interval) => interval.parse::<Interval>()?,
        None => Interval::default(),
    };
    let request = BatchRequest::new(&body.symbols, range, interval)?;
    let result = desk.orchestrator.run(&request).await?;
    Ok(Json(MetricsResponse {
        success: true,
        result,
    }))
}
