use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use orchestrator::BatchError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] CoreError),
    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// A batch in which every symbol failed answers `207` with the per-symbol messages;
/// anything wrong with the request itself answers `400`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Batch(BatchError::AggregateFailure { failures }) => {
                tracing::warn!(failed = failures.len(), "Batch produced no data.");
                (
                    StatusCode::MULTI_STATUS,
                    "No data could be fetched for any of the requested symbols.".to_string(),
                    json!(failures),
                )
            }
            AppError::Batch(BatchError::Source(source_err)) => {
                tracing::error!(error = ?source_err, "Price source error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The price source is not available right now.".to_string(),
                    json!([]),
                )
            }
            AppError::Batch(BatchError::InvalidRequest(message)) => {
                (StatusCode::BAD_REQUEST, message, json!([]))
            }
            AppError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string(), json!([])),
            AppError::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text(), json!([])),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "errors": errors,
        }));
        (status, body).into_response()
    }
}
