//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Body of the plaintext liveness routes
pub const LIVENESS_MESSAGE: &str = "Glauc Backend Server is Running";

/// Response for the operator health endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub model: String,
    pub uptime_seconds: u64,
}

/// Liveness probe: if we can respond, we're alive
///
/// GET / and GET /api/health
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Service health with version and uptime information
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        model: state.gemini.model().to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
