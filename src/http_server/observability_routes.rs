//! Observability HTTP Routes
//!
//! Health check and the process-wide counters.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::observability;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Routes nested under `/observability`
pub fn observability_routes() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Health check at the root
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(observability::metrics().to_json()))
}
