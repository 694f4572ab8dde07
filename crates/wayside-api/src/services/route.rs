use wayside_core::formats::{detour_route_feature, extended_route_feature};
use wayside_core::models::{PlannedRoute, TransportProfile};
use wayside_core::units::round_to;

use crate::dto::{
    CreateRouteRequest, DetourRouteRequest, DetourRouteResponse, RouteResponse, WaypointsRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Service for route planning requests
pub struct RouteService;

impl RouteService {
    pub async fn create(
        state: &AppState,
        request: &CreateRouteRequest,
    ) -> Result<RouteResponse, ApiError> {
        let profile = request.profile.unwrap_or(state.defaults.profile);
        let planner = state.planner();

        let planned = if request.avoid_highways {
            planner.smart_reroute(request.start, request.end, profile).await?
        } else {
            planner.create_route(request.start, request.end, profile).await?
        };

        Self::respond(&planned, profile)
    }

    pub async fn through_waypoints(
        state: &AppState,
        request: &WaypointsRequest,
    ) -> Result<RouteResponse, ApiError> {
        let profile = request.profile.unwrap_or(state.defaults.profile);
        let planned = state.planner().route_through(&request.waypoints, profile).await?;

        Self::respond(&planned, profile)
    }

    pub async fn detour(
        state: &AppState,
        request: &DetourRouteRequest,
    ) -> Result<DetourRouteResponse, ApiError> {
        let profile = request.profile.unwrap_or(state.defaults.profile);
        let detour = state
            .planner()
            .create_detour_route(request.start, request.detour, request.end, profile)
            .await?;

        Ok(DetourRouteResponse {
            profile,
            distance_km: detour.distance_km(),
            duration_minutes: detour.duration_minutes(),
            first_leg_km: detour.first_leg_km,
            second_leg_km: detour.second_leg_km,
            route: detour_route_feature(&detour)?,
        })
    }

    fn respond(planned: &PlannedRoute, profile: TransportProfile) -> Result<RouteResponse, ApiError> {
        Ok(RouteResponse {
            profile,
            distance_km: round_to(planned.distance_km(), 2),
            duration_minutes: round_to(planned.duration_minutes(), 1),
            route: extended_route_feature(planned)?,
        })
    }
}
