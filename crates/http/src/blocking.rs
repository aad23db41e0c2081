//! Helpers for running blocking service calls in async handlers.
//!
//! The service talks to SQLite synchronously, so every command that may
//! touch the store goes through `spawn_blocking`.

use axum::Json;
use physlog_service::ServiceError;
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure and wraps its value in `Json`.
///
/// # Example
/// ```ignore
/// let service = Arc::clone(&state.service);
/// blocking_json(move || service.refresh()).await
/// ```
pub async fn blocking_json<T, F>(f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static + Serialize,
{
    blocking_result(f).await.map(Json)
}

/// Runs a blocking closure and returns its raw value for further processing.
pub async fn blocking_result<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| {
            tracing::error!("Join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed: {e}"))
        })?
        .map_err(ApiError::from)
}
