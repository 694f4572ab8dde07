use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use wayside_analysis::filter::AmenityLocation;
use wayside_analysis::lookup::MatchingLocation;
use wayside_analysis::{
    AnalysisDiagnostics, DetourCandidate, DetourPoint, DetourSummary, GeneralSummary, RouteInfo,
};
use wayside_core::models::{Coordinate, RouteWaypoint, TransportProfile};

/// Output for route command
#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub profile: TransportProfile,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub coordinates: usize,
    pub waypoints: Vec<RouteWaypoint>,
    pub output_path: String,
}

/// Output for analyze command
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub route_info: RouteInfo,
    pub detour_summary: DetourSummary,
    pub diagnostics: AnalysisDiagnostics,
    pub summary: GeneralSummary,
    pub report_path: Option<String>,
}

/// Output for find command
#[derive(Debug, Serialize)]
pub struct FindOutput {
    pub detour_point: DetourPoint,
    pub alternatives: Vec<DetourCandidate>,
}

/// Output for detour command
#[derive(Debug, Serialize)]
pub struct DetourOutput {
    pub profile: TransportProfile,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub first_leg_km: f64,
    pub second_leg_km: f64,
    pub coordinates: usize,
    pub output_path: String,
}

/// One row per listed amenity
#[derive(Debug, Tabled)]
pub struct AmenityRow {
    #[tabled(rename = "Near")]
    pub near: String,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub amenity_type: String,
    #[tabled(rename = "Distance (m)")]
    pub distance_m: String,
}

impl AmenityRow {
    /// Rows for filtered summaries, grouped by category
    pub fn from_locations(locations: &[AmenityLocation]) -> Vec<Self> {
        let mut rows = Vec::new();
        for location in locations {
            for (category, amenities) in &location.amenity_summary {
                for amenity in amenities {
                    rows.push(Self {
                        near: format_coordinate(location.coordinate),
                        group: category.to_string(),
                        name: amenity.name.clone(),
                        amenity_type: amenity.amenity_type.clone(),
                        distance_m: format!("{:.1}", amenity.distance_m),
                    });
                }
            }
        }
        rows
    }

    /// Rows for specific-type lookups, grouped by the requested type
    pub fn from_matches(locations: &[MatchingLocation]) -> Vec<Self> {
        let mut rows = Vec::new();
        for location in locations {
            for (matched, amenities) in &location.amenities_by_type {
                for amenity in amenities {
                    rows.push(Self {
                        near: format_coordinate(location.coordinate),
                        group: matched.clone(),
                        name: amenity.name.clone(),
                        amenity_type: amenity.amenity_type.clone(),
                        distance_m: format!("{:.1}", amenity.distance_m),
                    });
                }
            }
        }
        rows
    }
}

#[derive(Debug, Tabled)]
pub struct CandidateRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub amenity_type: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Detour (m)")]
    pub detour_m: String,
}

impl From<&DetourCandidate> for CandidateRow {
    fn from(candidate: &DetourCandidate) -> Self {
        Self {
            name: candidate.amenity.name.clone(),
            amenity_type: candidate.amenity.amenity_type.clone(),
            location: format_coordinate(candidate.amenity.location),
            detour_m: format!("{:.1}", candidate.detour_distance_m),
        }
    }
}

/// Output for config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub fn format_coordinate(c: Coordinate) -> String {
    format!("{:.5}, {:.5}", c.lat, c.lon)
}

pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}
