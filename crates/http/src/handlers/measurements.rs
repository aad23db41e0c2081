use std::sync::Arc;

use axum::{Json, extract::State};

use physlog_core::{
    MSG_MEASUREMENT_ADDED, MSG_NOTHING_TO_DELETE, MSG_ROW_DELETED, MeasurementRecord,
};
use physlog_service::MeasurementInput;

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::response_types::MutationResponse;

/// Raw measurement rows of the current snapshot.
pub async fn list_measurements(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<MeasurementRecord>> {
    Json(state.service.snapshot().measurements.clone())
}

pub async fn add_measurement(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MeasurementInput>,
) -> Result<Json<MutationResponse<MeasurementRecord>>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || {
        let record = service.add_measurement(&input)?;
        Ok(MutationResponse { message: MSG_MEASUREMENT_ADDED, record: Some(record) })
    })
    .await
}

pub async fn delete_last_measurement(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MutationResponse<MeasurementRecord>>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || {
        let deleted = service.delete_last_measurement()?;
        let message = if deleted.is_some() { MSG_ROW_DELETED } else { MSG_NOTHING_TO_DELETE };
        Ok(MutationResponse { message, record: deleted })
    })
    .await
}
