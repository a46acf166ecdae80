//! # Prism Analytics Engine
//!
//! This crate turns raw provider price history into per-symbol risk/return metrics and
//! cross-asset statistics: return and price correlation matrices, rolling correlation,
//! and pairwise OLS regression.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O and no knowledge of HTTP. It depends only on `core-types`;
//!   provider payloads arrive already fetched.
//! - **Boundary normalization:** `normalizer` is the single place that understands
//!   provider response shapes. Everything after it works on day-keyed `PricePoint`s.
//! - **Never NaN:** Degenerate inputs (single points, zero variance, disjoint dates)
//!   produce `0` or an omitted entry, never `NaN`/`inf`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs the per-symbol pipeline and builds cross-asset analytics.
//! - `EngineParams`: Annualization factor, window sizes and regression limits.
//! - `BatchResult` and friends: The serializable output records.
//! - `AnalyticsError`: Returned when a payload holds no usable series.

pub mod alignment;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod normalizer;
pub mod regression;
pub mod report;
pub mod returns;
mod stats;

pub use correlation::{CorrelationMatrix, CorrelationPoint, RollingCorrelation, pearson};
pub use engine::{AnalyticsEngine, EngineParams};
pub use error::AnalyticsError;
pub use metrics::{Metrics, calculate_metrics};
pub use normalizer::normalize;
pub use regression::{LinePoint, RegressionResult, ScatterPoint};
pub use report::{BatchResult, CrossAssetAnalytics, SeriesResult, SymbolError};
pub use returns::log_returns;
