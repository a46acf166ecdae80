use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The provider returned nothing that could be turned into a price series.
    /// Carries the provider's own message when it sent one.
    #[error("{0}")]
    DataUnavailable(String),
}
