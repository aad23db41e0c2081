//! Dashboard UI - embedded HTML/CSS/JS
//!
//! Serves a single page at `/` with three tabs: the chart (merged table,
//! subject/test selectors, trend plot), ID entry, and test data entry.

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

/// Embedded HTML for the dashboard
pub const VIEWER_HTML: &str = include_str!("viewer.html");

/// Serve the dashboard HTML page
pub async fn serve_viewer() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(VIEWER_HTML))
        .into_response()
}
