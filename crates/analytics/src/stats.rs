//! Sample statistics shared by the metrics, correlation and regression calculators.
//!
//! Every function here returns `0.0` instead of `NaN`/`inf` when its input is too
//! short or has no spread, so callers can hand the results straight to charts.

/// Below this share of the raw second moment, a variance is treated as rounding noise.
const RELATIVE_SPREAD_TOLERANCE: f64 = 1e-12;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance around a precomputed mean.
pub fn sample_variance(values: &[f64], mu: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
    (sum_sq / (values.len() - 1) as f64).max(0.0)
}

pub fn sample_std_dev(values: &[f64], mu: f64) -> f64 {
    sample_variance(values, mu).sqrt()
}

/// Bessel-corrected sample covariance of two equally long slices.
pub fn sample_covariance(x: &[f64], y: &[f64], mean_x: f64, mean_y: f64) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    sum / (n - 1) as f64
}

/// True when a variance carries no information beyond floating-point noise.
///
/// A constant series can yield a variance of `1e-36` instead of `0` because its mean
/// is not exactly representable; comparing against the second moment catches that.
pub fn is_degenerate_spread(variance: f64, mu: f64) -> bool {
    if !variance.is_finite() || variance <= 0.0 {
        return true;
    }
    variance <= RELATIVE_SPREAD_TOLERANCE * (variance + mu * mu)
}

/// Adjusted Fisher-Pearson sample skewness.
///
/// `n / ((n-1)(n-2)) * sum((x - mean)^3) / s^3`; zero for fewer than 3 values or no spread.
pub fn sample_skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let mu = mean(values);
    let variance = sample_variance(values, mu);
    if is_degenerate_spread(variance, mu) {
        return 0.0;
    }
    let sigma = variance.sqrt();
    let n = n as f64;
    let sum_cubed: f64 = values.iter().map(|v| (v - mu).powi(3)).sum();
    finite_or_zero((n / ((n - 1.0) * (n - 2.0))) * (sum_cubed / sigma.powi(3)))
}

/// Bias-corrected sample excess kurtosis.
///
/// Zero for fewer than 4 values or no spread.
pub fn sample_excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let mu = mean(values);
    let variance = sample_variance(values, mu);
    if is_degenerate_spread(variance, mu) {
        return 0.0;
    }
    let n = n as f64;
    let sum_fourth: f64 = values.iter().map(|v| (v - mu).powi(4)).sum();

    let numerator = (n * (n + 1.0) * sum_fourth)
        / ((n - 1.0) * (n - 2.0) * (n - 3.0) * variance * variance);
    let correction = (3.0 * (n - 1.0) * (n - 1.0)) / ((n - 2.0) * (n - 3.0));
    finite_or_zero(numerator - correction)
}

/// Collapses `NaN` and infinities to `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_uses_bessel_correction() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mu = mean(&values);
        assert!((mu - 5.0).abs() < 1e-12);
        // Population std of this set is 2; the sample std is sqrt(32/7).
        assert!((sample_std_dev(&values, mu) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn short_inputs_yield_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_variance(&[1.0], 1.0), 0.0);
        assert_eq!(sample_skewness(&[1.0, 2.0]), 0.0);
        assert_eq!(sample_excess_kurtosis(&[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(sample_covariance(&[1.0], &[1.0], 1.0, 1.0), 0.0);
    }

    #[test]
    fn symmetric_sample_has_no_skew() {
        let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
        assert!(sample_skewness(&values).abs() < 1e-12);
    }

    #[test]
    fn right_tail_gives_positive_skew() {
        let values = [1.0, 1.0, 1.0, 2.0, 10.0];
        assert!(sample_skewness(&values) > 1.0);
    }

    #[test]
    fn excess_kurtosis_matches_reference_value() {
        // Reference: adjusted excess kurtosis of 1..=10 is -1.2.
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        assert!((sample_excess_kurtosis(&values) + 1.2).abs() < 1e-9);
    }

    #[test]
    fn constant_series_is_degenerate() {
        let values = [0.1; 25];
        let mu = mean(&values);
        assert!(is_degenerate_spread(sample_variance(&values, mu), mu));
        assert_eq!(sample_skewness(&values), 0.0);
        assert_eq!(sample_excess_kurtosis(&values), 0.0);
    }
}
