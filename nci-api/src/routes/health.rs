//! Health endpoints

use axum::{extract::State, Json};

use crate::state::AppState;

/// Liveness check
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": state.version,
    }))
}

/// Readiness check
pub async fn ready_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
    }))
}
