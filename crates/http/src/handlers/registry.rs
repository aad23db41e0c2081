use std::sync::Arc;

use axum::{Json, extract::State};

use physlog_core::{MSG_NOTHING_TO_DELETE, MSG_REGISTRY_ADDED, MSG_ROW_DELETED, RegistryRecord};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::query_types::RegistryForm;
use crate::response_types::MutationResponse;

/// Registry rows of the current snapshot.
pub async fn list_registry(State(state): State<Arc<AppState>>) -> Json<Vec<RegistryRecord>> {
    Json(state.service.snapshot().registry.clone())
}

pub async fn add_registry_entry(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistryForm>,
) -> Result<Json<MutationResponse<RegistryRecord>>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || {
        let record =
            service.add_registry_entry(&form.local_name, &form.external_name, &form.identifier)?;
        Ok(MutationResponse { message: MSG_REGISTRY_ADDED, record: Some(record) })
    })
    .await
}

pub async fn delete_last_registry_entry(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MutationResponse<RegistryRecord>>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || {
        let deleted = service.delete_last_registry_entry()?;
        let message = if deleted.is_some() { MSG_ROW_DELETED } else { MSG_NOTHING_TO_DELETE };
        Ok(MutationResponse { message, record: deleted })
    })
    .await
}
