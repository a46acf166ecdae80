use crate::alignment::AlignedPair;
use crate::stats::{finite_or_zero, is_degenerate_spread, mean, sample_covariance, sample_variance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

/// OLS fit of the second symbol's returns on the first's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    pub pair: [String; 2],
    pub beta: f64,
    pub alpha: f64,
    pub r_squared: f64,
    pub correlation: f64,
    pub sample_size: usize,
    pub scatter: Vec<ScatterPoint>,
    /// Fitted values at the smallest and largest `x`.
    pub regression_line: [LinePoint; 2],
}

/// Limits on which pairs get a regression and how much of it is returned.
#[derive(Debug, Clone, Copy)]
pub struct RegressionParams {
    pub min_sample: usize,
    pub max_scatter_points: usize,
}

/// Fits `y = alpha + beta * x` over an aligned pair.
///
/// `correlation` must be the value the correlation matrix holds for this pair;
/// `r_squared` is its square. Returns `None` when the pair has fewer than
/// `min_sample` observations or either side has no variance.
pub fn regress(
    pair: [String; 2],
    aligned: &AlignedPair,
    correlation: f64,
    params: RegressionParams,
) -> Option<RegressionResult> {
    let n = aligned.len();
    if n < params.min_sample || n < 2 {
        return None;
    }

    let mean_x = mean(&aligned.x);
    let mean_y = mean(&aligned.y);
    let var_x = sample_variance(&aligned.x, mean_x);
    let var_y = sample_variance(&aligned.y, mean_y);
    if is_degenerate_spread(var_x, mean_x) || is_degenerate_spread(var_y, mean_y) {
        return None;
    }

    let beta = finite_or_zero(sample_covariance(&aligned.x, &aligned.y, mean_x, mean_y) / var_x);
    let alpha = finite_or_zero(mean_y - beta * mean_x);

    let (min_x, max_x) = aligned
        .x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let regression_line = [
        LinePoint { x: min_x, y: alpha + beta * min_x },
        LinePoint { x: max_x, y: alpha + beta * max_x },
    ];

    Some(RegressionResult {
        pair,
        beta,
        alpha,
        r_squared: correlation * correlation,
        correlation,
        sample_size: n,
        scatter: downsample(aligned, params.max_scatter_points),
        regression_line,
    })
}

/// Keeps every `ceil(n / max_points)`-th observation, starting with the first.
fn downsample(aligned: &AlignedPair, max_points: usize) -> Vec<ScatterPoint> {
    let n = aligned.len();
    let step = n.div_ceil(max_points.max(1)).max(1);
    (0..n)
        .step_by(step)
        .map(|i| ScatterPoint {
            x: aligned.x[i],
            y: aligned.y[i],
            date: aligned.dates[i],
        })
        .collect()
}
