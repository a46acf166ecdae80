use analytics::SymbolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every requested symbol failed; nothing partial is returned.
    #[error("All requested symbols failed: {}", describe(.failures))]
    AggregateFailure { failures: Vec<SymbolError> },

    #[error("Price source setup failed: {0}")]
    Source(#[from] api_client::error::ApiError),
}

fn describe(failures: &[SymbolError]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.symbol, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
