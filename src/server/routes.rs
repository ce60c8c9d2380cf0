//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    http::{HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{analyze, health};
use crate::middleware::logging::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Liveness routes (plain text, no state)
    let health_routes = Router::new()
        .route("/", get(health::liveness))
        .route("/api/health", get(health::liveness))
        .route("/health", get(health::health_check));

    let glauc_routes = Router::new().route("/analyze", post(analyze::analyze));

    Router::new()
        .nest("/api/glauc", glauc_routes)
        .merge(health_routes)
        // Apply middleware layers (last added = outermost = runs first)
        .layer(create_cors_layer())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// The demo site is served from a different origin than the relay
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TRACE_ID_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}
