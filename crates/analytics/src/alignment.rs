//! Date-keyed views of price and return series, and their common date axis.
//!
//! Price dates and return dates are aligned separately: one unusable close removes two
//! returns, so the two axes can differ.

use chrono::NaiveDate;
use core_types::{PricePoint, ReturnPoint};
use std::collections::{BTreeMap, BTreeSet};

/// One series keyed by calendar day.
pub type DateMap = BTreeMap<NaiveDate, f64>;

pub fn price_map(series: &[PricePoint]) -> DateMap {
    series.iter().map(|p| (p.date, p.close)).collect()
}

pub fn return_map(returns: &[ReturnPoint]) -> DateMap {
    returns.iter().map(|r| (r.date, r.value)).collect()
}

/// Sorted dates present in every one of `maps`.
///
/// Returns an empty axis for an empty input and stops intersecting as soon as the
/// running intersection is empty.
pub fn intersect_dates(maps: &[&DateMap]) -> Vec<NaiveDate> {
    let Some((first, rest)) = maps.split_first() else {
        return Vec::new();
    };

    let mut common: BTreeSet<NaiveDate> = first.keys().copied().collect();
    for map in rest {
        if common.is_empty() {
            break;
        }
        common.retain(|date| map.contains_key(date));
    }
    common.into_iter().collect()
}

/// Two series projected onto a shared date axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Projects `x` and `y` onto `axis`, skipping days where either value is missing or
/// not finite.
pub fn align_pair(axis: &[NaiveDate], x: &DateMap, y: &DateMap) -> AlignedPair {
    let mut pair = AlignedPair::default();
    for date in axis {
        let (Some(&a), Some(&b)) = (x.get(date), y.get(date)) else {
            continue;
        };
        if !a.is_finite() || !b.is_finite() {
            continue;
        }
        pair.dates.push(*date);
        pair.x.push(a);
        pair.y.push(b);
    }
    pair
}
