use axum::{
    Router,
    routing::{get, post},
};
use configuration::Config;
use core_types::{AssetClass, PriceRange};
use orchestrator::{BatchError, BatchOrchestrator};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// One asset class as the HTTP layer sees it.
#[derive(Clone)]
pub struct AssetDesk {
    pub orchestrator: BatchOrchestrator,
    /// Used when a request does not name a range.
    pub default_range: PriceRange,
}

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub equity: AssetDesk,
    pub crypto: AssetDesk,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, BatchError> {
        let desk = |asset_class: AssetClass| -> Result<AssetDesk, BatchError> {
            Ok(AssetDesk {
                orchestrator: BatchOrchestrator::for_asset_class(config, asset_class)?,
                default_range: config.asset_class(asset_class).default_range,
            })
        };
        Ok(Self {
            equity: desk(AssetClass::Equity)?,
            crypto: desk(AssetClass::Crypto)?,
        })
    }
}

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/finance/stocks/metrics", post(handlers::stock_metrics))
        .route("/api/finance/crypto/metrics", post(handlers::crypto_metrics))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing is initialized by the caller.
pub async fn run_server(config: &Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = app(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, EngineParams};
    use api_client::PriceSource;
    use api_client::error::ApiError;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_types::payload::MarketChartResponse;
    use core_types::{Interval, ProviderPayload};
    use serde_json::Value;
    use tower::ServiceExt;

    /// Serves a 40-day oscillating series for every symbol except `FAIL*`.
    struct StubSource;

    #[async_trait]
    impl PriceSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn fetch_history(
            &self,
            symbol: &str,
            _range: PriceRange,
            _interval: Interval,
        ) -> Result<ProviderPayload, ApiError> {
            if symbol.starts_with("FAIL") {
                return Err(ApiError::NotFound(format!("{} not found", symbol)));
            }
            let phase = symbol.len() as f64;
            let mut price = 100.0;
            let prices = (0..40)
                .map(|i| {
                    price *= (((i as f64) * 0.5 + phase).sin() * 0.02).exp();
                    [1_704_067_200_000.0 + i as f64 * 86_400_000.0, price]
                })
                .collect();
            Ok(ProviderPayload::MarketChart(MarketChartResponse {
                prices: Some(prices),
                total_volumes: None,
                error: None,
            }))
        }
    }

    fn test_app() -> Router {
        let desk = |params: EngineParams, default_range| AssetDesk {
            orchestrator: BatchOrchestrator::new(Arc::new(StubSource), AnalyticsEngine::new(params)),
            default_range,
        };
        let state = AppState {
            equity: desk(
                EngineParams {
                    price_correlation: true,
                    ..EngineParams::default()
                },
                PriceRange::OneYear,
            ),
            crypto: desk(
                EngineParams {
                    periods_per_year: 365.0,
                    ..EngineParams::default()
                },
                PriceRange::SixMonths,
            ),
        };
        app(Arc::new(state))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stock_metrics_returns_flattened_batch() {
        let (status, json) = post_json(
            "/api/finance/stocks/metrics",
            r#"{"symbols":["aapl","MSFT","FAILX"],"range":"3mo"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["range"], "3mo");
        assert_eq!(json["interval"], "1d");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["symbol"], "AAPL");
        assert_eq!(json["errors"][0]["symbol"], "FAILX");
        assert!(json["analytics"]["priceCorrelationMatrix"].is_array());
        assert_eq!(json["analytics"]["returnsCorrelationMatrix"][0][0], 1.0);
    }

    #[tokio::test]
    async fn crypto_metrics_uses_default_range() {
        let (status, json) = post_json("/api/finance/crypto/metrics", r#"{"symbols":["BTC"]}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["range"], "6mo");
        assert!(json["analytics"].is_null());
    }

    #[tokio::test]
    async fn total_failure_is_multi_status() {
        let (status, json) = post_json(
            "/api/finance/crypto/metrics",
            r#"{"symbols":["FAIL1","FAIL2"]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::MULTI_STATUS);
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
        assert_eq!(json["errors"][1]["message"], "FAIL2 not found");
    }

    #[tokio::test]
    async fn bad_requests_are_rejected() {
        let (status, json) = post_json("/api/finance/stocks/metrics", r#"{"symbols":[]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"], serde_json::json!([]));

        let (status, _) = post_json(
            "/api/finance/stocks/metrics",
            r#"{"symbols":["AAPL"],"range":"10y"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json("/api/finance/stocks/metrics", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
