use crate::error::BatchError;
use core_types::{Interval, PriceRange};
use std::collections::HashSet;

/// A validated batch: a non-empty list of distinct, upper-cased tickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    symbols: Vec<String>,
    pub range: PriceRange,
    pub interval: Interval,
}

impl BatchRequest {
    /// Trims and upper-cases every ticker, drops blanks, and removes duplicates while
    /// keeping first-seen order.
    pub fn new<I, S>(symbols: I, range: PriceRange, interval: Interval) -> Result<Self, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let symbols: Vec<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        if symbols.is_empty() {
            return Err(BatchError::InvalidRequest(
                "At least one symbol is required".to_string(),
            ));
        }
        Ok(Self {
            symbols,
            range,
            interval,
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}
