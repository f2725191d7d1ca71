//! Route definitions
//!
//! Author: hephaex@gmail.com

use crate::handlers::{health, page};
use crate::middleware::security_headers_middleware;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Build the application router
///
/// `GET /` renders the empty page and `POST /` runs whichever action the
/// pressed button names.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_body_size;

    Router::new()
        .route("/", get(page::index).post(page::submit))
        .route("/assets/style.css", get(page::stylesheet))
        // Probes
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::prometheus_metrics))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(security_headers_middleware))
        .with_state(state)
}
