//! Pearson correlation: pairwise, full matrix, and rolling window.

use crate::alignment::{AlignedPair, DateMap, align_pair};
use crate::stats::finite_or_zero;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Relative tolerance under which a centered sum-of-squares term counts as zero.
const DENOMINATOR_TOLERANCE: f64 = 1e-12;

/// Symmetric `k x k` matrix, rows and columns in symbol order.
pub type CorrelationMatrix = Vec<Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingCorrelation {
    pub pair: [String; 2],
    pub series: Vec<CorrelationPoint>,
}

/// Pearson correlation of two equally long slices using the sum formula.
///
/// Only positions where both values are finite are counted. Fewer than two counted
/// pairs, or a series without spread, gives `0.0`. The result is clamped to `[-1, 1]`.
///
/// The sums run over values shifted by their mean so that a large level with small
/// moves (a price near 1.0 moving in the seventh decimal) keeps its spread.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let pairs = || {
        x.iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(&a, &b)| (a, b))
    };
    let count = pairs().count();
    if count < 2 {
        return 0.0;
    }
    let n = count as f64;
    let (total_x, total_y) = pairs().fold((0.0, 0.0), |(sx, sy), (a, b)| (sx + a, sy + b));
    let (mean_x, mean_y) = (total_x / n, total_y / n);

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (a, b) in pairs() {
        let (a, b) = (a - mean_x, b - mean_y);
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_x2 += a * a;
        sum_y2 += b * b;
    }

    let spread_x = n * sum_x2 - sum_x * sum_x;
    let spread_y = n * sum_y2 - sum_y * sum_y;
    // A constant series leaves only rounding noise around its mean.
    if spread_x <= DENOMINATOR_TOLERANCE * n * sum_x2 || spread_y <= DENOMINATOR_TOLERANCE * n * sum_y2
    {
        return 0.0;
    }
    let denominator = (spread_x * spread_y).sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return 0.0;
    }

    finite_or_zero((n * sum_xy - sum_x * sum_y) / denominator).clamp(-1.0, 1.0)
}

/// Correlation of every series against every other on a shared date axis.
///
/// The diagonal is always `1`. Each unordered pair is computed once and mirrored.
pub fn correlation_matrix(maps: &[&DateMap], axis: &[NaiveDate]) -> CorrelationMatrix {
    let k = maps.len();
    let mut matrix = vec![vec![0.0; k]; k];
    for i in 0..k {
        matrix[i][i] = 1.0;
        for j in (i + 1)..k {
            let AlignedPair { x, y, .. } = align_pair(axis, maps[i], maps[j]);
            let value = pearson(&x, &y);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    matrix
}

/// Correlation over each `window`-long slice of an aligned pair, dated at the slice's
/// last day.
///
/// Every window yields a point, so the output has `max(0, len - window + 1)` entries.
/// A window whose correlation is undefined reports `0`.
pub fn rolling_correlation(pair: &AlignedPair, window: usize) -> Vec<CorrelationPoint> {
    if window < 2 || pair.len() < window {
        return Vec::new();
    }
    (window..=pair.len())
        .map(|end| {
            let start = end - window;
            CorrelationPoint {
                date: pair.dates[end - 1],
                value: pearson(&pair.x[start..end], &pair.y[start..end]),
            }
        })
        .collect()
}
