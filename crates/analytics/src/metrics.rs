use crate::stats::{
    finite_or_zero, is_degenerate_spread, mean, sample_excess_kurtosis, sample_skewness,
    sample_variance,
};
use core_types::{PricePoint, ReturnPoint};
use serde::{Deserialize, Serialize};

/// Per-symbol risk/return statistics.
///
/// `mean_return`, `std_return` and `historical_volatility` are annualized and expressed
/// in percent. `sharpe_ratio` assumes a zero risk-free rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Number of log returns the statistics were computed from.
    pub sample_size: usize,
    pub last_close: f64,
    pub price_change_percent: f64,
    pub historical_volatility: f64,
    pub mean_return: f64,
    pub std_return: f64,
    pub sharpe_ratio: f64,
    pub skewness: f64,
    /// Excess kurtosis (0 for a normal distribution).
    pub kurtosis: f64,
}

/// Computes the metrics of one symbol.
///
/// `periods_per_year` is the annualization factor of the asset class (252 for
/// exchange-traded instruments, 365 for markets that never close). Series with fewer
/// than two usable closes yield an all-zero record.
pub fn calculate_metrics(
    series: &[PricePoint],
    returns: &[ReturnPoint],
    periods_per_year: f64,
) -> Metrics {
    let usable_closes = series.iter().filter(|p| p.has_usable_close()).count();
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Metrics::default();
    };
    if usable_closes < 2 {
        return Metrics::default();
    }

    let last_close = finite_or_zero(last.close);
    let price_change_percent = if first.has_usable_close() {
        finite_or_zero((last.close / first.close - 1.0) * 100.0)
    } else {
        0.0
    };

    let values: Vec<f64> = returns.iter().map(|r| r.value).collect();
    if values.is_empty() {
        return Metrics {
            last_close,
            price_change_percent,
            ..Metrics::default()
        };
    }

    let mu = mean(&values);
    let variance = sample_variance(&values, mu);
    let annualized_mean = mu * periods_per_year;
    let annualized_std = variance.sqrt() * periods_per_year.sqrt();

    let sharpe_ratio = if is_degenerate_spread(variance, mu) || annualized_std == 0.0 {
        0.0
    } else {
        annualized_mean / annualized_std
    };

    Metrics {
        sample_size: values.len(),
        last_close,
        price_change_percent,
        historical_volatility: finite_or_zero(annualized_std * 100.0),
        mean_return: finite_or_zero(annualized_mean * 100.0),
        std_return: finite_or_zero(annualized_std * 100.0),
        sharpe_ratio: finite_or_zero(sharpe_ratio),
        skewness: sample_skewness(&values),
        kurtosis: sample_excess_kurtosis(&values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::log_returns;
    use chrono::{Days, NaiveDate};

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + Days::new(i as u64), close))
            .collect()
    }

    fn metrics_for(closes: &[f64], periods_per_year: f64) -> Metrics {
        let series = series(closes);
        let returns = log_returns(&series);
        calculate_metrics(&series, &returns, periods_per_year)
    }

    #[test]
    fn steady_growth_has_no_volatility() {
        let m = metrics_for(&[100.0, 110.0, 121.0], 252.0);
        assert_eq!(m.sample_size, 2);
        assert_eq!(m.last_close, 121.0);
        assert!((m.price_change_percent - 21.0).abs() < 1e-9);
        assert!((m.mean_return - 1.1f64.ln() * 252.0 * 100.0).abs() < 1e-9);
        assert!(m.std_return.abs() < 1e-9);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.skewness, 0.0);
        assert_eq!(m.kurtosis, 0.0);
    }

    #[test]
    fn annualization_factor_is_applied() {
        let closes = [100.0, 102.0, 99.0, 103.0, 101.0, 104.0];
        let equity = metrics_for(&closes, 252.0);
        let crypto = metrics_for(&closes, 365.0);

        let returns = log_returns(&series(&closes));
        let values: Vec<f64> = returns.iter().map(|r| r.value).collect();
        let mu = mean(&values);
        let sigma = sample_variance(&values, mu).sqrt();

        assert!((equity.mean_return - mu * 252.0 * 100.0).abs() < 1e-9);
        assert!((equity.std_return - sigma * 252f64.sqrt() * 100.0).abs() < 1e-9);
        assert!((crypto.std_return - sigma * 365f64.sqrt() * 100.0).abs() < 1e-9);
        assert_eq!(equity.historical_volatility, equity.std_return);
        assert!((equity.sharpe_ratio - (mu * 252.0) / (sigma * 252f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_two_closes_is_all_zero() {
        assert_eq!(metrics_for(&[100.0], 252.0), Metrics::default());
        assert_eq!(metrics_for(&[], 252.0), Metrics::default());
        assert_eq!(metrics_for(&[0.0, 100.0, -5.0], 252.0), Metrics::default());
    }

    #[test]
    fn price_change_uses_first_and_last_points() {
        // The middle zero removes both returns, the price change is unaffected.
        let m = metrics_for(&[50.0, 0.0, 75.0], 365.0);
        assert_eq!(m.sample_size, 0);
        assert!((m.price_change_percent - 50.0).abs() < 1e-9);
        assert_eq!(m.last_close, 75.0);
        assert_eq!(m.std_return, 0.0);
    }

    #[test]
    fn all_outputs_are_finite() {
        let m = metrics_for(&[1e-300, 1e300, 1e-300, 1e300, 1.0], 252.0);
        for value in [
            m.last_close,
            m.price_change_percent,
            m.historical_volatility,
            m.mean_return,
            m.std_return,
            m.sharpe_ratio,
            m.skewness,
            m.kurtosis,
        ] {
            assert!(value.is_finite());
        }
    }
}
