use std::sync::Arc;

use axum::{extract::State, Json};

use wayside_analysis::{DetourPointMatch, NeedsSummary, SpecificAmenities};

use crate::dto::{
    AnalysisRequest, AnalysisResponse, DetourPointRequest, NeedsRequest, SpecificAmenitiesRequest,
};
use crate::error::ApiError;
use crate::services::AnalysisService;
use crate::state::AppState;

pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    tracing::info!(
        route_file = ?request.route.route_file,
        spacing_m = ?request.sample_spacing_m,
        radius_m = ?request.detour_radius_m,
        "Processing analysis request"
    );

    let response = AnalysisService::general(&state, &request).await?;
    Ok(Json(response))
}

pub async fn analyze_needs(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NeedsRequest>,
) -> Result<Json<NeedsSummary>, ApiError> {
    tracing::info!(needs = ?request.needs, "Processing needs request");

    let response = AnalysisService::needs(&state, &request).await?;
    Ok(Json(response))
}

pub async fn analyze_specific(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpecificAmenitiesRequest>,
) -> Result<Json<SpecificAmenities>, ApiError> {
    tracing::info!(types = ?request.amenity_types, "Processing specific amenities request");

    let response = AnalysisService::specific(&state, &request).await?;
    Ok(Json(response))
}

pub async fn find_detour_point(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetourPointRequest>,
) -> Result<Json<DetourPointMatch>, ApiError> {
    tracing::info!(
        amenity_type = %request.amenity_type,
        name = ?request.name,
        "Processing detour point request"
    );

    let response = AnalysisService::detour_point(&state, &request).await?;
    Ok(Json(response))
}
