use crate::correlation::{CorrelationMatrix, RollingCorrelation};
use crate::metrics::Metrics;
use crate::regression::RegressionResult;
use core_types::{Interval, PricePoint, PriceRange, ReturnPoint};
use serde::{Deserialize, Serialize};

/// Everything computed for one successfully fetched symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub symbol: String,
    pub series: Vec<PricePoint>,
    pub returns: Vec<ReturnPoint>,
    pub metrics: Metrics,
}

/// A symbol that could not be analysed, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolError {
    pub symbol: String,
    pub message: String,
}

/// Cross-series results over the symbols that succeeded.
///
/// Matrices are indexed in `symbols` order. Pairs are listed as `(i, j)` with `i < j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossAssetAnalytics {
    pub symbols: Vec<String>,
    pub returns_correlation_matrix: CorrelationMatrix,
    /// Correlation of raw closes; only filled for asset classes configured for it.
    pub price_correlation_matrix: Option<CorrelationMatrix>,
    pub rolling_correlations: Vec<RollingCorrelation>,
    pub regression_analytics: Vec<RegressionResult>,
}

/// The outcome of one batch request.
///
/// `analytics` is `None` unless at least two symbols succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub range: PriceRange,
    pub interval: Interval,
    pub data: Vec<SeriesResult>,
    pub errors: Vec<SymbolError>,
    pub analytics: Option<CrossAssetAnalytics>,
}
