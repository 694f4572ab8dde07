use serde::{Deserialize, Serialize};

use wayside_core::models::{Coordinate, DetourOpportunity};

/// Route-level facts reported with every analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Coordinates in the original route geometry
    pub total_coordinates: usize,

    /// Points chosen by the sampler
    pub sampled_points: usize,

    /// Length over all original coordinates, rounded to 0.01 km
    pub route_distance_km: f64,

    pub start_coordinate: Coordinate,
    pub end_coordinate: Coordinate,
}

/// Counts of unique opportunities after deduplication
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetourSummary {
    pub total_detours: usize,
    pub amenity_detours: usize,
    pub way_detours: usize,
}

/// Opportunities found around one sample point, before deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// 1-based position in sample order
    pub point_id: usize,
    pub coordinate: Coordinate,
    pub opportunities: Vec<DetourOpportunity>,
}

impl RouteSegment {
    pub fn detour_count(&self) -> usize {
        self.opportunities.len()
    }
}

/// Skip and failure counts for a single sample point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDiagnostics {
    pub area_amenities_extracted: usize,
    pub area_amenities_skipped: usize,
    pub point_amenities_skipped: usize,
    pub ways_extracted: usize,
    pub ways_skipped: usize,

    /// A map-data query failed and the point contributed nothing
    pub query_failed: bool,
}

/// Result of searching around one sample point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryOutcome {
    /// Point amenities, then area amenities, then ways
    pub opportunities: Vec<DetourOpportunity>,
    pub diagnostics: DiscoveryDiagnostics,
}

/// Diagnostics summed over every sample point of an analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDiagnostics {
    pub area_amenities_extracted: usize,
    pub area_amenities_skipped: usize,
    pub point_amenities_skipped: usize,
    pub ways_extracted: usize,
    pub ways_skipped: usize,

    /// Sample points whose queries failed
    pub failed_points: usize,
}

impl AnalysisDiagnostics {
    pub fn absorb(&mut self, point: &DiscoveryDiagnostics) {
        self.area_amenities_extracted += point.area_amenities_extracted;
        self.area_amenities_skipped += point.area_amenities_skipped;
        self.point_amenities_skipped += point.point_amenities_skipped;
        self.ways_extracted += point.ways_extracted;
        self.ways_skipped += point.ways_skipped;
        if point.query_failed {
            self.failed_points += 1;
        }
    }
}

/// Complete result of analyzing a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub route_info: RouteInfo,
    pub detour_summary: DetourSummary,

    /// Per-sample-point results in sample order
    pub segments: Vec<RouteSegment>,

    /// Unique amenity opportunities, first occurrence in sample order
    pub amenities: Vec<DetourOpportunity>,

    /// Unique way opportunities, first occurrence in sample order
    pub ways: Vec<DetourOpportunity>,

    pub diagnostics: AnalysisDiagnostics,
}
