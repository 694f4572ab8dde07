use serde::Deserialize;
use std::path::PathBuf;

use wayside_core::models::{Coordinate, TransportProfile};

/// Create route request body
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    pub profile: Option<TransportProfile>,

    /// Retry through detour waypoints to pass fewer major roads
    #[serde(default)]
    pub avoid_highways: bool,
}

/// Route through waypoints request body
#[derive(Debug, Deserialize)]
pub struct WaypointsRequest {
    pub waypoints: Vec<Coordinate>,
    pub profile: Option<TransportProfile>,
}

/// Start -> detour -> end request body
#[derive(Debug, Deserialize)]
pub struct DetourRouteRequest {
    pub start: Coordinate,
    pub detour: Coordinate,
    pub end: Coordinate,
    pub profile: Option<TransportProfile>,
}

/// The route to analyze: a GeoJSON file on the server or inline coordinates
#[derive(Debug, Default, Deserialize)]
pub struct RouteInput {
    pub route_file: Option<PathBuf>,
    pub coordinates: Option<Vec<Coordinate>>,
}

/// General analysis request body
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub route: RouteInput,

    pub sample_spacing_m: Option<f64>,
    pub detour_radius_m: Option<f64>,

    /// Include every sample point's detours in the response
    #[serde(default)]
    pub include_report: bool,
}

/// Needs-filtered analysis request body
#[derive(Debug, Deserialize)]
pub struct NeedsRequest {
    #[serde(flatten)]
    pub analysis: AnalysisRequest,

    #[serde(default)]
    pub needs: Vec<String>,
}

/// Specific amenity types request body
#[derive(Debug, Deserialize)]
pub struct SpecificAmenitiesRequest {
    #[serde(flatten)]
    pub analysis: AnalysisRequest,

    pub amenity_types: Vec<String>,
}

/// Detour point search request body
#[derive(Debug, Deserialize)]
pub struct DetourPointRequest {
    #[serde(flatten)]
    pub route: RouteInput,

    pub amenity_type: String,
    pub name: Option<String>,

    /// Search radius around the route, 300 m when absent
    pub max_detour_distance_m: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_request_flattens_route() {
        let request: NeedsRequest = serde_json::from_value(serde_json::json!({
            "coordinates": [{"lat": 51.0, "lon": -114.0}, {"lat": 51.01, "lon": -114.0}],
            "detour_radius_m": 150.0,
            "needs": ["coffee"]
        }))
        .unwrap();

        assert_eq!(request.analysis.route.coordinates.unwrap().len(), 2);
        assert_eq!(request.analysis.detour_radius_m, Some(150.0));
        assert!(request.analysis.route.route_file.is_none());
        assert_eq!(request.needs, vec!["coffee"]);
    }

    #[test]
    fn test_route_request_defaults() {
        let request: CreateRouteRequest = serde_json::from_value(serde_json::json!({
            "start": {"lat": 51.0, "lon": -114.0},
            "end": {"lat": 51.1, "lon": -114.1},
            "profile": "foot"
        }))
        .unwrap();

        assert_eq!(request.profile, Some(TransportProfile::Foot));
        assert!(!request.avoid_highways);
    }
}
