use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The measurement table has no rows, so there is no latest date to anchor a window on.
    #[error("No data available: the measurement table is empty")]
    NoData,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NoData => (StatusCode::NOT_FOUND, "No data available"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            log::error!("{}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
