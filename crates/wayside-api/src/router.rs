use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Routes
        .route("/api/v1/routes", post(handlers::create_route))
        .route("/api/v1/routes/waypoints", post(handlers::route_through_waypoints))
        .route("/api/v1/routes/detour", post(handlers::create_detour_route))

        // Analysis
        .route("/api/v1/analysis", post(handlers::analyze_route))
        .route("/api/v1/analysis/needs", post(handlers::analyze_needs))
        .route("/api/v1/analysis/specific", post(handlers::analyze_specific))
        .route("/api/v1/detour-point", post(handlers::find_detour_point))

        .with_state(state)
}
