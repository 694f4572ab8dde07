use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{
    CreateRouteRequest, DetourRouteRequest, DetourRouteResponse, RouteResponse, WaypointsRequest,
};
use crate::error::ApiError;
use crate::services::RouteService;
use crate::state::AppState;

pub async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    tracing::info!(
        start = ?request.start,
        end = ?request.end,
        avoid_highways = request.avoid_highways,
        "Creating route"
    );

    let response = RouteService::create(&state, &request).await?;
    Ok(Json(response))
}

pub async fn route_through_waypoints(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WaypointsRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    tracing::info!(waypoints = request.waypoints.len(), "Routing through waypoints");

    let response = RouteService::through_waypoints(&state, &request).await?;
    Ok(Json(response))
}

pub async fn create_detour_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetourRouteRequest>,
) -> Result<Json<DetourRouteResponse>, ApiError> {
    tracing::info!(detour = ?request.detour, "Creating detour route");

    let response = RouteService::detour(&state, &request).await?;
    Ok(Json(response))
}
