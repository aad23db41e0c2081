use std::sync::Arc;

use anyhow::Result;
use physlog_core::AppConfig;
use physlog_http::{AppState, create_router};

use crate::open_service;

pub(crate) async fn run(config: &AppConfig, strict: bool, port: u16, host: String) -> Result<()> {
    let service = open_service(config, strict)?;
    tracing::info!(
        registry_db = %config.registry_db.display(),
        measurement_db = %config.measurement_db.display(),
        strict,
        "Storage opened"
    );

    let state = Arc::new(AppState::new(service));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
