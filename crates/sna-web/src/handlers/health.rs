//! Health check handlers
//!
//! Author: hephaex@gmail.com

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build_info: BuildInfo,
}

#[derive(Serialize)]
pub struct BuildInfo {
    pub name: String,
    pub rust_version: String,
}

/// Liveness probe - basic health check
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build_info: BuildInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            rust_version: "1.75+".to_string(),
        },
    })
}

/// Readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub models: ModelInfo,
}

#[derive(Serialize)]
pub struct ModelInfo {
    pub summarization: String,
    pub question_answering: String,
    pub ner: String,
    pub device: String,
}

/// Readiness probe
///
/// The server only starts listening after every model has loaded, so a
/// running server is always ready.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let inference = &state.config.inference;

    (
        StatusCode::OK,
        Json(ReadinessResponse {
            ready: true,
            models: ModelInfo {
                summarization: inference.summarization_model.clone(),
                question_answering: inference.qa_model.clone(),
                ner: inference.ner_model.clone(),
                device: inference.device.to_string(),
            },
        }),
    )
}

/// Prometheus-compatible metrics endpoint
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counters = [
        (
            "sna_requests_total",
            "Total number of page requests",
            state.get_request_count(),
        ),
        (
            "sna_analyze_total",
            "Completed Analyze actions",
            state.analyze_count.load(Ordering::SeqCst),
        ),
        (
            "sna_answer_total",
            "Completed Get Answer actions",
            state.answer_count.load(Ordering::SeqCst),
        ),
        (
            "sna_warnings_total",
            "Actions rejected for blank input",
            state.warning_count.load(Ordering::SeqCst),
        ),
        (
            "sna_errors_total",
            "Actions that failed in a model facility",
            state.error_count.load(Ordering::SeqCst),
        ),
    ];

    let mut output = String::new();

    output.push_str("# HELP sna_uptime_seconds Time since server start\n");
    output.push_str("# TYPE sna_uptime_seconds gauge\n");
    output.push_str(&format!("sna_uptime_seconds {}\n\n", state.uptime_secs()));

    for (name, help, value) in counters {
        output.push_str(&format!("# HELP {name} {help}\n"));
        output.push_str(&format!("# TYPE {name} counter\n"));
        output.push_str(&format!("{name} {value}\n\n"));
    }

    output.push_str("# HELP sna_build_info Build information\n");
    output.push_str("# TYPE sna_build_info gauge\n");
    output.push_str(&format!(
        "sna_build_info{{version=\"{}\"}} 1\n",
        env!("CARGO_PKG_VERSION")
    ));

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        output,
    )
}
