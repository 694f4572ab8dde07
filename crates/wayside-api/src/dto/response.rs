use geojson::Feature;
use serde::Serialize;

use wayside_analysis::{AnalysisDiagnostics, DetourSummary, GeneralSummary, RouteInfo, SavedReport};
use wayside_core::models::TransportProfile;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "wayside-api",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// A planned route as a GeoJSON Feature with headline figures
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub profile: TransportProfile,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub route: Feature,
}

/// A start -> detour -> end route
#[derive(Debug, Serialize)]
pub struct DetourRouteResponse {
    pub profile: TransportProfile,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub first_leg_km: f64,
    pub second_leg_km: f64,
    pub route: Feature,
}

/// General analysis result
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub route_info: RouteInfo,
    pub detour_summary: DetourSummary,
    pub diagnostics: AnalysisDiagnostics,
    pub summary: GeneralSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SavedReport>,
}
