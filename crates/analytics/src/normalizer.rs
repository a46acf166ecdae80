//! Turns provider payloads into the canonical, date-ordered `PricePoint` sequence.
//!
//! This is the only place that knows about provider response shapes. Everything
//! downstream works on day-keyed `PricePoint`s.

use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDate};
use core_types::payload::{ChartQuote, ChartResponse, MarketChartResponse};
use core_types::{PricePoint, ProviderPayload};
use std::collections::{BTreeMap, HashMap};

/// Normalizes any supported payload.
///
/// Points without a close are dropped, timestamps are truncated to the calendar day,
/// and several points on the same day collapse into the last one seen.
pub fn normalize(payload: &ProviderPayload) -> Result<Vec<PricePoint>, AnalyticsError> {
    let series = match payload {
        ProviderPayload::Chart(body) => normalize_chart(body)?,
        ProviderPayload::MarketChart(body) => normalize_market_chart(body)?,
    };

    if series.is_empty() {
        return Err(AnalyticsError::DataUnavailable(
            "No price data returned for the requested range".to_string(),
        ));
    }
    Ok(series)
}

fn normalize_chart(body: &ChartResponse) -> Result<Vec<PricePoint>, AnalyticsError> {
    let envelope = body.chart.as_ref();
    let Some(result) = envelope
        .and_then(|chart| chart.result.as_ref())
        .and_then(|results| results.first())
    else {
        let message = envelope
            .and_then(|chart| chart.error.as_ref())
            .and_then(|error| error.description.clone())
            .unwrap_or_else(|| "Unknown response shape from chart provider".to_string());
        return Err(AnalyticsError::DataUnavailable(message));
    };

    let timestamps = result.timestamp.as_deref().unwrap_or_default();
    let empty = ChartQuote::default();
    let quote = result
        .indicators
        .as_ref()
        .and_then(|indicators| indicators.quote.as_ref())
        .and_then(|quotes| quotes.first())
        .unwrap_or(&empty);

    let mut by_day = BTreeMap::new();
    for (idx, &ts) in timestamps.iter().enumerate() {
        let Some(close) = column_value(&quote.close, idx) else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        by_day.insert(
            date,
            PricePoint {
                date,
                close,
                open: column_value(&quote.open, idx),
                high: column_value(&quote.high, idx),
                low: column_value(&quote.low, idx),
                volume: column_value(&quote.volume, idx),
            },
        );
    }

    Ok(by_day.into_values().collect())
}

fn normalize_market_chart(body: &MarketChartResponse) -> Result<Vec<PricePoint>, AnalyticsError> {
    let Some(prices) = body.prices.as_ref() else {
        let message = body
            .error
            .clone()
            .unwrap_or_else(|| "Invalid response from market chart provider".to_string());
        return Err(AnalyticsError::DataUnavailable(message));
    };

    let volumes: HashMap<NaiveDate, f64> = body
        .total_volumes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|[_, volume]| volume.is_finite())
        .filter_map(|&[ts, volume]| day_from_millis(ts).map(|date| (date, volume)))
        .collect();

    let mut by_day = BTreeMap::new();
    for &[ts, close] in prices {
        if !close.is_finite() {
            continue;
        }
        let Some(date) = day_from_millis(ts) else {
            continue;
        };
        let mut point = PricePoint::new(date, close);
        point.volume = volumes.get(&date).copied();
        by_day.insert(date, point);
    }

    Ok(by_day.into_values().collect())
}

fn column_value(column: &Option<Vec<Option<f64>>>, idx: usize) -> Option<f64> {
    column
        .as_ref()
        .and_then(|values| values.get(idx).copied().flatten())
        .filter(|value| value.is_finite())
}

fn day_from_millis(ts: f64) -> Option<NaiveDate> {
    if !ts.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ts as i64).map(|dt| dt.date_naive())
}
