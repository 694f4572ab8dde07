//! Persisted detour report
//!
//! The saved form groups every opportunity under the sample point that found
//! it, so the same amenity may appear under several points. Totals in
//! `detour_summary` are the deduplicated counts.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use wayside_core::error::Result;
use wayside_core::models::{Category, Coordinate, DetourOpportunity};

use crate::models::{AnalysisReport, DetourSummary, RouteInfo};

/// Default file name for saved reports
pub const DEFAULT_REPORT_FILE: &str = "detour_opportunities.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAmenity {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub amenity_type: String,
    pub category: Category,
    pub brand: Option<String>,
    pub opening_hours: Option<String>,
    pub distance_from_route_m: f64,
    pub location: Coordinate,
    pub osm_link: String,

    /// Category-specific attributes of area amenities
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_info: BTreeMap<String, String>,
}

impl SavedAmenity {
    pub fn is_unnamed(&self) -> bool {
        self.name.starts_with("Unnamed")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWay {
    pub id: u64,
    pub highway: String,
    pub maxspeed: String,
    pub surface: String,
    pub distance_from_route_m: f64,
    pub middle_node: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointDetours {
    #[serde(default)]
    pub amenities: Vec<SavedAmenity>,
    #[serde(default)]
    pub ways: Vec<SavedWay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPoint {
    pub point_id: usize,
    pub coordinate: Coordinate,
    pub detour_count: usize,
    #[serde(default)]
    pub detours: PointDetours,
}

/// The on-disk report format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    pub route_info: RouteInfo,

    /// ISO-8601 local time the report was produced
    pub analysis_date: Option<String>,

    pub detour_summary: DetourSummary,
    pub sampling_points: Vec<SamplingPoint>,
}

impl SavedReport {
    /// Build the saved form stamped with the current local time
    pub fn from_analysis(report: &AnalysisReport) -> Self {
        Self::with_timestamp(report, Local::now())
    }

    pub fn with_timestamp(report: &AnalysisReport, timestamp: DateTime<Local>) -> Self {
        let sampling_points = report
            .segments
            .iter()
            .map(|segment| {
                let mut detours = PointDetours::default();
                for opportunity in &segment.opportunities {
                    match opportunity {
                        DetourOpportunity::Amenity { amenity, detour_distance_m, .. } => {
                            detours.amenities.push(SavedAmenity {
                                id: amenity.id,
                                name: amenity.name.clone(),
                                amenity_type: amenity.amenity_type.clone(),
                                category: amenity.category,
                                brand: amenity.brand.clone(),
                                opening_hours: amenity.opening_hours.clone(),
                                distance_from_route_m: *detour_distance_m,
                                location: amenity.location,
                                osm_link: amenity.osm_link.clone(),
                                additional_info: amenity
                                    .area
                                    .as_ref()
                                    .map(|a| a.additional_info.clone())
                                    .unwrap_or_default(),
                            });
                        }
                        DetourOpportunity::Way { way, detour_distance_m, .. } => {
                            detours.ways.push(SavedWay {
                                id: way.id,
                                highway: way.highway.clone(),
                                maxspeed: way.maxspeed.clone(),
                                surface: way.surface.clone(),
                                distance_from_route_m: *detour_distance_m,
                                middle_node: way.middle_node,
                            });
                        }
                    }
                }

                SamplingPoint {
                    point_id: segment.point_id,
                    coordinate: segment.coordinate,
                    detour_count: segment.detour_count(),
                    detours,
                }
            })
            .collect();

        Self {
            route_info: report.route_info.clone(),
            analysis_date: Some(timestamp.to_rfc3339()),
            detour_summary: report.detour_summary,
            sampling_points,
        }
    }

    /// Amenity and way entries summed over all points, duplicates included
    pub fn instance_counts(&self) -> (usize, usize) {
        self.sampling_points.iter().fold((0, 0), |(a, w), point| {
            (a + point.detours.amenities.len(), w + point.detours.ways.len())
        })
    }

    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        let (amenities, ways) = self.instance_counts();
        tracing::info!(
            path = %path.display(),
            points = self.sampling_points.len(),
            amenities,
            ways,
            "Saved detour report"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
