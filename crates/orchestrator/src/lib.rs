//! # Prism Batch Orchestrator
//!
//! Runs one analytics request end to end: every symbol is fetched and analysed on its
//! own task, the results are gathered behind a single barrier, and only then are the
//! cross-asset statistics computed over the survivors.
//!
//! A failing symbol is recorded in `errors` and never aborts the batch. Only when every
//! symbol fails does `run` return `BatchError::AggregateFailure`.

use analytics::{AnalyticsEngine, BatchResult, EngineParams, SeriesResult, SymbolError};
use api_client::{CoinGeckoClient, PriceSource, StaticSymbolMap, YahooClient};
use configuration::Config;
use core_types::AssetClass;
use futures::future::join_all;
use std::sync::Arc;

pub mod error;
pub mod request;

pub use error::BatchError;
pub use request::BatchRequest;

/// Fetches and analyses a batch of symbols for one asset class.
///
/// Cheap to clone; the source and engine are shared behind `Arc`s.
#[derive(Clone)]
pub struct BatchOrchestrator {
    source: Arc<dyn PriceSource>,
    engine: Arc<AnalyticsEngine>,
}

impl BatchOrchestrator {
    pub fn new(source: Arc<dyn PriceSource>, engine: AnalyticsEngine) -> Self {
        Self {
            source,
            engine: Arc::new(engine),
        }
    }

    /// Builds the orchestrator for `asset_class` from the application settings.
    ///
    /// Equities are served by the Yahoo chart source, crypto by CoinGecko with the
    /// configured ticker -> id table.
    pub fn for_asset_class(config: &Config, asset_class: AssetClass) -> Result<Self, BatchError> {
        let class = config.asset_class(asset_class);
        let source: Arc<dyn PriceSource> = match asset_class {
            AssetClass::Equity => Arc::new(YahooClient::new(&config.providers)?),
            AssetClass::Crypto => {
                let resolver = Arc::new(StaticSymbolMap::new(config.symbol_ids.clone()));
                Arc::new(CoinGeckoClient::new(
                    &config.providers,
                    resolver,
                    class.max_history_days,
                )?)
            }
        };
        let params = EngineParams {
            periods_per_year: class.periods_per_year,
            rolling_window: config.engine.rolling_window,
            min_regression_sample: config.engine.min_regression_sample,
            max_scatter_points: config.engine.max_scatter_points,
            price_correlation: class.price_correlation,
        };
        Ok(Self::new(source, AnalyticsEngine::new(params)))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn engine(&self) -> &AnalyticsEngine {
        &self.engine
    }

    /// Runs the batch.
    ///
    /// # Errors
    ///
    /// `AggregateFailure` when no symbol produced a series; it lists every symbol's
    /// message in request order.
    pub async fn run(&self, request: &BatchRequest) -> Result<BatchResult, BatchError> {
        let symbols = request.symbols();
        tracing::info!(
            source = self.source.name(),
            symbols = symbols.len(),
            range = %request.range,
            interval = %request.interval,
            "Starting batch."
        );

        let tasks: Vec<_> = symbols
            .iter()
            .map(|symbol| {
                let source = Arc::clone(&self.source);
                let engine = Arc::clone(&self.engine);
                let symbol = symbol.clone();
                let (range, interval) = (request.range, request.interval);

                tokio::spawn(async move {
                    match source.fetch_history(&symbol, range, interval).await {
                        Ok(payload) => engine
                            .analyse_series(&symbol, &payload)
                            .map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    }
                })
            })
            .collect();

        // Barrier: nothing cross-series runs until every task has resolved.
        let outcomes = join_all(tasks).await;

        let mut data: Vec<SeriesResult> = Vec::new();
        let mut errors: Vec<SymbolError> = Vec::new();
        for (symbol, outcome) in symbols.iter().zip(outcomes) {
            let message = match outcome {
                Ok(Ok(result)) => {
                    data.push(result);
                    continue;
                }
                Ok(Err(message)) => message,
                Err(join_error) => format!("Analysis task failed: {}", join_error),
            };
            tracing::warn!(symbol = %symbol, error = %message, "Symbol failed.");
            errors.push(SymbolError {
                symbol: symbol.clone(),
                message,
            });
        }

        if data.is_empty() {
            tracing::warn!(failed = errors.len(), "Every symbol in the batch failed.");
            return Err(BatchError::AggregateFailure { failures: errors });
        }

        let result = self
            .engine
            .batch_result(request.range, request.interval, data, errors);
        tracing::info!(
            succeeded = result.data.len(),
            failed = result.errors.len(),
            cross_asset = result.analytics.is_some(),
            "Batch complete."
        );
        Ok(result)
    }
}
