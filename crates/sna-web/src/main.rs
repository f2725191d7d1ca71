//! SNA Web Server
//!
//! Loads every model before binding the listener. A missing or unreadable
//! artifact aborts startup.
//!
//! Author: hephaex@gmail.com

use anyhow::Context;
use sna_analysis::build_service;
use sna_core::{telemetry::init_tracing, AppConfig};
use sna_web::{create_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::var("SNA_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("Invalid configuration")?;

    init_tracing(&config.logging);

    tracing::info!(
        vectorizer = %config.models.vectorizer_path.display(),
        classifier = %config.models.classifier_path.display(),
        device = %config.inference.device,
        "Loading models"
    );
    let service = build_service(&config).context("Model files not found or unreadable")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::new(service)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("SNA web server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
