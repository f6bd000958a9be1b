//! API route handlers

pub mod contribution;
pub mod health;
pub mod intelligence;
pub mod score;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Score query
        .route("/network/score/:buyer_id", get(score::get_score))
        // Contribution endpoints
        .route("/network/contribute", post(contribution::contribute))
        .route("/network/register", post(contribution::register))
        // Intelligence and dashboards
        .route("/network/intelligence", get(intelligence::get_intelligence))
        .route("/network/insights", get(intelligence::get_insights))
        .route("/network/distribution", get(intelligence::get_distribution))
        .route("/network/trends/:industry", get(intelligence::get_trends))
        // State
        .with_state(state)
}
