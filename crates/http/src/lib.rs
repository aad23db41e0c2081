//! HTTP API server for physlog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod blocking;
mod handlers;
mod query_types;
mod response_types;
mod viewer;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use physlog_service::DashboardService;

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Snapshot owner and command handler for both tables
    pub service: Arc<DashboardService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: DashboardService) -> Self {
        Self { service: Arc::new(service) }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(viewer::serve_viewer))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/refresh", post(handlers::views::refresh))
        .route(
            "/api/registry",
            get(handlers::registry::list_registry).post(handlers::registry::add_registry_entry),
        )
        .route("/api/registry/last", delete(handlers::registry::delete_last_registry_entry))
        .route(
            "/api/measurements",
            get(handlers::measurements::list_measurements)
                .post(handlers::measurements::add_measurement),
        )
        .route("/api/measurements/last", delete(handlers::measurements::delete_last_measurement))
        .route("/api/merged", get(handlers::views::merged_view))
        .route("/api/selectors", get(handlers::views::selectors))
        .route("/api/chart", get(handlers::views::chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
