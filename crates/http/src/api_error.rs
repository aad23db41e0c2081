//! Typed API error for HTTP handlers.
//!
//! Converts service errors into JSON responses with proper status codes.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use physlog_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: malformed form input.
    BadRequest(String),
    /// 404 Not Found: subject not in the registry.
    NotFound(String),
    /// 422 Unprocessable Entity: strict-mode duplicate.
    UnprocessableEntity(String),
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: the database could not be reached.
    ServiceUnavailable(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::UnprocessableEntity(msg)
            | Self::ServiceUnavailable(msg) => msg,
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                "internal server error".to_owned()
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(_) => Self::BadRequest(err.status_message()),
            ServiceError::Lookup(_) => Self::NotFound(err.status_message()),
            ServiceError::Conflict(_) => Self::UnprocessableEntity(err.status_message()),
            ServiceError::StoreUnavailable(ref msg) => {
                tracing::warn!(error = %msg, "store unavailable");
                Self::ServiceUnavailable(err.status_message())
            },
            ServiceError::Storage(_) => Self::Internal(err.into()),
        }
    }
}
