use crate::alignment::{AlignedPair, DateMap, align_pair, intersect_dates, price_map, return_map};
use crate::correlation::{RollingCorrelation, correlation_matrix, rolling_correlation};
use crate::error::AnalyticsError;
use crate::metrics::calculate_metrics;
use crate::normalizer::normalize;
use crate::regression::{RegressionParams, regress};
use crate::report::{BatchResult, CrossAssetAnalytics, SeriesResult, SymbolError};
use crate::returns::log_returns;
use core_types::{Interval, PriceRange, ProviderPayload};

/// Tunables that differ between asset classes or deployments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Annualization factor for mean and volatility.
    pub periods_per_year: f64,
    /// Observations per rolling-correlation window.
    pub rolling_window: usize,
    /// Pairs with fewer aligned returns get no regression.
    pub min_regression_sample: usize,
    /// Upper bound on scatter points returned per regression.
    pub max_scatter_points: usize,
    /// Also correlate raw closes, not just returns.
    pub price_correlation: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            periods_per_year: 252.0,
            rolling_window: 30,
            min_regression_sample: 20,
            max_scatter_points: 400,
            price_correlation: false,
        }
    }
}

/// A stateless calculator turning provider payloads into per-symbol and cross-asset analytics.
///
/// One engine is built per asset class and shared across requests; it holds only its
/// parameters, so it is `Send + Sync` and needs no locking.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    params: EngineParams,
}

impl AnalyticsEngine {
    pub fn new(params: EngineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Normalizes a payload and computes its returns and metrics.
    ///
    /// # Errors
    ///
    /// `DataUnavailable` when the payload holds no usable series.
    pub fn analyse_series(
        &self,
        symbol: &str,
        payload: &ProviderPayload,
    ) -> Result<SeriesResult, AnalyticsError> {
        let series = normalize(payload)?;
        let returns = log_returns(&series);
        let metrics = calculate_metrics(&series, &returns, self.params.periods_per_year);
        tracing::debug!(
            symbol,
            points = series.len(),
            returns = returns.len(),
            "Series analysed."
        );
        Ok(SeriesResult {
            symbol: symbol.to_string(),
            series,
            returns,
            metrics,
        })
    }

    /// Assembles the response for a finished batch.
    pub fn batch_result(
        &self,
        range: PriceRange,
        interval: Interval,
        data: Vec<SeriesResult>,
        errors: Vec<SymbolError>,
    ) -> BatchResult {
        let analytics = self.build_analytics(&data);
        BatchResult {
            range,
            interval,
            data,
            errors,
            analytics,
        }
    }

    /// Correlation, rolling correlation and regression across all `results`.
    ///
    /// Returns `None` for fewer than two series. Every series is projected onto the
    /// dates all of them share, so matrix entries and regressions agree.
    pub fn build_analytics(&self, results: &[SeriesResult]) -> Option<CrossAssetAnalytics> {
        if results.len() < 2 {
            return None;
        }

        let symbols: Vec<String> = results.iter().map(|r| r.symbol.clone()).collect();
        let return_maps: Vec<DateMap> = results.iter().map(|r| return_map(&r.returns)).collect();
        let return_refs: Vec<&DateMap> = return_maps.iter().collect();
        let return_axis = intersect_dates(&return_refs);

        let returns_correlation_matrix = correlation_matrix(&return_refs, &return_axis);

        let price_correlation_matrix = self.params.price_correlation.then(|| {
            let price_maps: Vec<DateMap> = results.iter().map(|r| price_map(&r.series)).collect();
            let price_refs: Vec<&DateMap> = price_maps.iter().collect();
            let price_axis = intersect_dates(&price_refs);
            correlation_matrix(&price_refs, &price_axis)
        });

        let regression_params = RegressionParams {
            min_sample: self.params.min_regression_sample,
            max_scatter_points: self.params.max_scatter_points,
        };
        let mut rolling_correlations = Vec::new();
        let mut regression_analytics = Vec::new();

        for i in 0..symbols.len() {
            for j in (i + 1)..symbols.len() {
                let pair = [symbols[i].clone(), symbols[j].clone()];
                let aligned: AlignedPair = align_pair(&return_axis, &return_maps[i], &return_maps[j]);

                rolling_correlations.push(RollingCorrelation {
                    pair: pair.clone(),
                    series: rolling_correlation(&aligned, self.params.rolling_window),
                });

                let correlation = returns_correlation_matrix[i][j];
                match regress(pair, &aligned, correlation, regression_params) {
                    Some(result) => regression_analytics.push(result),
                    None => tracing::debug!(
                        x = %symbols[i],
                        y = %symbols[j],
                        sample = aligned.len(),
                        "Pair skipped for regression."
                    ),
                }
            }
        }

        tracing::debug!(
            symbols = symbols.len(),
            aligned_returns = return_axis.len(),
            regressions = regression_analytics.len(),
            "Cross-asset analytics built."
        );

        Some(CrossAssetAnalytics {
            symbols,
            returns_correlation_matrix,
            price_correlation_matrix,
            rolling_correlations,
            regression_analytics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::{PricePoint, ReturnPoint};

    fn series_result(symbol: &str, closes: &[f64]) -> SeriesResult {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series: Vec<PricePoint> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Days::new(i as u64), c))
            .collect();
        let returns: Vec<ReturnPoint> = log_returns(&series);
        let metrics = calculate_metrics(&series, &returns, 252.0);
        SeriesResult {
            symbol: symbol.to_string(),
            series,
            returns,
            metrics,
        }
    }

    /// A price path driven by a deterministic oscillating return.
    fn path(n: usize, scale: f64, phase: f64) -> Vec<f64> {
        let mut price = 100.0;
        (0..n)
            .map(|i| {
                if i > 0 {
                    price *= (((i as f64) * 0.9 + phase).sin() * 0.02 * scale).exp();
                }
                price
            })
            .collect()
    }

    #[test]
    fn single_series_has_no_analytics() {
        let engine = AnalyticsEngine::default();
        assert!(engine.build_analytics(&[series_result("AAPL", &path(40, 1.0, 0.0))]).is_none());
        assert!(engine.build_analytics(&[]).is_none());
    }

    #[test]
    fn co_moving_pair_has_beta_two() {
        let engine = AnalyticsEngine::default();
        let results = [
            series_result("AAA", &path(60, 1.0, 0.0)),
            series_result("BBB", &path(60, 2.0, 0.0)),
        ];
        let analytics = engine.build_analytics(&results).unwrap();

        assert!((analytics.returns_correlation_matrix[0][1] - 1.0).abs() < 1e-9);
        assert!(analytics.price_correlation_matrix.is_none());
        let fit = &analytics.regression_analytics[0];
        assert_eq!(fit.pair, ["AAA".to_string(), "BBB".to_string()]);
        assert!((fit.beta - 2.0).abs() < 1e-9);
        assert!(fit.alpha.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(fit.sample_size, 59);
    }

    #[test]
    fn every_pair_is_reported_once() {
        let engine = AnalyticsEngine::new(EngineParams {
            price_correlation: true,
            ..EngineParams::default()
        });
        let results = [
            series_result("A", &path(50, 1.0, 0.0)),
            series_result("B", &path(50, 1.0, 0.8)),
            series_result("C", &path(50, 0.5, 2.1)),
        ];
        let analytics = engine.build_analytics(&results).unwrap();

        assert_eq!(analytics.symbols, vec!["A", "B", "C"]);
        assert_eq!(analytics.rolling_correlations.len(), 3);
        assert_eq!(analytics.rolling_correlations[2].pair, ["B".to_string(), "C".to_string()]);
        for rolling in &analytics.rolling_correlations {
            assert_eq!(rolling.series.len(), 49 - 30 + 1);
        }
        for fit in &analytics.regression_analytics {
            assert!(fit.sample_size >= 20);
            assert!((fit.r_squared - fit.correlation * fit.correlation).abs() < 1e-12);
        }

        let prices = analytics.price_correlation_matrix.unwrap();
        assert_eq!(prices.len(), 3);
        assert_eq!(prices[1][1], 1.0);
    }

    #[test]
    fn short_overlap_skips_regression_but_keeps_pair() {
        let engine = AnalyticsEngine::default();
        let results = [
            series_result("X", &path(15, 1.0, 0.0)),
            series_result("Y", &path(15, 1.0, 1.0)),
        ];
        let analytics = engine.build_analytics(&results).unwrap();
        assert!(analytics.regression_analytics.is_empty());
        assert_eq!(analytics.rolling_correlations.len(), 1);
        assert!(analytics.rolling_correlations[0].series.is_empty());
    }

    #[test]
    fn batch_result_serializes_with_camel_case_keys() {
        let engine = AnalyticsEngine::default();
        let data = vec![
            series_result("AAA", &path(25, 1.0, 0.0)),
            series_result("BBB", &path(25, 1.0, 0.4)),
        ];
        let errors = vec![SymbolError {
            symbol: "ZZZ".to_string(),
            message: "not found".to_string(),
        }];
        let result = engine.batch_result(PriceRange::OneMonth, Interval::Daily, data, errors);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["range"], "1mo");
        assert_eq!(json["interval"], "1d");
        assert_eq!(json["errors"][0]["symbol"], "ZZZ");
        assert!(json["data"][0]["metrics"]["priceChangePercent"].is_number());
        assert!(json["analytics"]["returnsCorrelationMatrix"].is_array());
        assert!(json["analytics"]["priceCorrelationMatrix"].is_null());
        assert!(json["analytics"]["regressionAnalytics"][0]["rSquared"].is_number());
    }
}
