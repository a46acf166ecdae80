use core_types::{PricePoint, ReturnPoint};

/// Natural-log returns between chronologically adjacent closes.
///
/// Each return is dated at the later close. A pair in which either close is not a
/// positive finite number is skipped rather than zero-filled, so the result can be
/// shorter than `series.len() - 1`.
pub fn log_returns(series: &[PricePoint]) -> Vec<ReturnPoint> {
    series
        .windows(2)
        .filter_map(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            if prev.has_usable_close() && current.has_usable_close() {
                Some(ReturnPoint {
                    date: current.date,
                    value: (current.close / prev.close).ln(),
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + chrono::Days::new(i as u64), close))
            .collect()
    }

    #[test]
    fn compounding_ten_percent_gives_equal_returns() {
        let returns = log_returns(&series(&[100.0, 110.0, 121.0]));
        assert_eq!(returns.len(), 2);
        assert!((returns[0].value - 1.1f64.ln()).abs() < 1e-12);
        assert!((returns[1].value - 1.1f64.ln()).abs() < 1e-12);
        assert_eq!(returns[1].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn non_positive_closes_shorten_the_series() {
        let returns = log_returns(&series(&[100.0, 0.0, 105.0, 110.0]));
        // 100->0 and 0->105 are both skipped.
        assert_eq!(returns.len(), 1);
        assert!((returns[0].value - (110.0f64 / 105.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn single_point_has_no_returns() {
        assert!(log_returns(&series(&[100.0])).is_empty());
        assert!(log_returns(&[]).is_empty());
    }
}
