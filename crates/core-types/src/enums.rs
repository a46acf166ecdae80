use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The market family a batch of symbols belongs to.
///
/// The asset class selects the data provider and the engine parameters
/// (annualization factor, correlation flavor) from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Listed-exchange instruments (stocks, ETFs).
    Equity,
    /// Always-trading markets.
    Crypto,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lookback window requested for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PriceRange {
    #[serde(rename = "1mo")]
    #[cfg_attr(feature = "clap", value(name = "1mo"))]
    OneMonth,
    #[serde(rename = "3mo")]
    #[cfg_attr(feature = "clap", value(name = "3mo"))]
    ThreeMonths,
    #[serde(rename = "6mo")]
    #[cfg_attr(feature = "clap", value(name = "6mo"))]
    SixMonths,
    #[serde(rename = "1y")]
    #[cfg_attr(feature = "clap", value(name = "1y"))]
    OneYear,
    #[serde(rename = "2y")]
    #[cfg_attr(feature = "clap", value(name = "2y"))]
    TwoYears,
}

impl PriceRange {
    /// Calendar days covered by the range.
    pub fn days(&self) -> u32 {
        match self {
            PriceRange::OneMonth => 30,
            PriceRange::ThreeMonths => 90,
            PriceRange::SixMonths => 180,
            PriceRange::OneYear => 365,
            PriceRange::TwoYears => 730,
        }
    }

    /// The wire code used by providers and the output contract (e.g. `"6mo"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::OneMonth => "1mo",
            PriceRange::ThreeMonths => "3mo",
            PriceRange::SixMonths => "6mo",
            PriceRange::OneYear => "1y",
            PriceRange::TwoYears => "2y",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1mo" => Ok(PriceRange::OneMonth),
            "3mo" => Ok(PriceRange::ThreeMonths),
            "6mo" => Ok(PriceRange::SixMonths),
            "1y" => Ok(PriceRange::OneYear),
            "2y" => Ok(PriceRange::TwoYears),
            other => Err(CoreError::InvalidInput("range".to_string(), other.to_string())),
        }
    }
}

/// Sampling interval of a price series. Only daily bars are supported today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    #[cfg_attr(feature = "clap", value(name = "1d"))]
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1d" => Ok(Interval::Daily),
            other => Err(CoreError::InvalidInput("interval".to_string(), other.to_string())),
        }
    }
}
