use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use physlog_core::MSG_REFRESHED;
use physlog_service::{ChartView, Selectors};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::query_types::ChartQuery;
use crate::response_types::{MergedResponse, RefreshResponse};

/// Re-read both tables.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let service = Arc::clone(&state.service);
    blocking_json(move || {
        let snapshot = service.refresh()?;
        Ok(RefreshResponse {
            message: MSG_REFRESHED,
            registry_rows: snapshot.registry.len(),
            measurement_rows: snapshot.measurements.len(),
            taken_at: snapshot.taken_at.to_rfc3339(),
        })
    })
    .await
}

/// Every measurement joined to the registry, plus rows that did not parse.
pub async fn merged_view(State(state): State<Arc<AppState>>) -> Json<MergedResponse> {
    let view = state.service.merged_view();
    Json(MergedResponse {
        skipped_rows: view.skipped.len(),
        rows: view.rows,
        skipped: view.skipped,
    })
}

pub async fn selectors(State(state): State<Arc<AppState>>) -> Json<Selectors> {
    Json(state.service.selectors())
}

pub async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<ChartView> {
    Json(state.service.chart(&query.subject, &query.test_item))
}
