//! Health check HTTP handlers

use axum::{extract::State, response::Response};
use serde_json::json;

use crate::web::{
    AppState,
    responses::{ok, service_unavailable},
};

/// Basic status plus cache and roster sizes
pub async fn health_check(State(state): State<AppState>) -> Response {
    ok(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": {
            "ready": state.cache.is_ready(),
            "entries": state.cache.len().await,
            "readOnly": state.cache.is_read_only(),
        },
        "roster": {
            "students": state.roster.students().len(),
            "companies": state.roster.companies().len(),
        },
    }))
}

/// 503 until the logo cache index has been loaded
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.cache.is_ready() {
        ok(json!({
            "status": "ready",
            "timestamp": chrono::Utc::now()
        }))
    } else {
        service_unavailable("Logo cache is still loading")
    }
}

pub async fn liveness_check() -> Response {
    ok(json!({
        "status": "alive",
        "timestamp": chrono::Utc::now()
    }))
}
