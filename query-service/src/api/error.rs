use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures surfaced by the query handlers, mapped to HTTP statuses at the
/// response boundary. Every variant renders as `{"detail": "<message>"}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Invalid {what} format. Please use '{expected}'")]
    InvalidFormat {
        what: &'static str,
        expected: &'static str,
    },
    #[error("Data not found for the specified date")]
    NotFound,
    #[error("Requested range is out of bounds. Available data range: {min} to {max}")]
    OutOfBounds { min: String, max: String },
    #[error("An error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFormat { .. } | ApiError::OutOfBounds { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::counter!("api_request_failures_total").increment(1);

        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
