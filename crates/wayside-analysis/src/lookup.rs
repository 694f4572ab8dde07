//! Targeted amenity searches over an analysis
//!
//! Both searches read the per-point segments rather than the deduplicated
//! lists, so an amenity seen from several sample points is found from each.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{Amenity, Coordinate};
use wayside_core::units::round_to;

use crate::models::{AnalysisReport, RouteInfo};

/// Matches farther than this from the route are left out
pub const SPECIFIC_MAX_DISTANCE_M: f64 = 300.0;

/// Default search radius when looking for a detour point
pub const DEFAULT_MAX_DETOUR_M: f64 = 300.0;

/// Alternatives offered next to the best detour point
const MAX_ALTERNATIVES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedAmenity {
    pub name: String,
    #[serde(rename = "type")]
    pub amenity_type: String,
    pub distance_m: f64,
    pub location: Coordinate,

    /// Requested type that selected this amenity
    pub matched_type: String,

    pub osm_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingLocation {
    pub coordinate: Coordinate,
    pub amenities_by_type: BTreeMap<String, Vec<MatchedAmenity>>,
    pub total_amenities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificAmenities {
    pub route_info: RouteInfo,
    pub requested_amenity_types: Vec<String>,
    pub total_matching_amenities: usize,
    pub matching_locations: Vec<MatchingLocation>,
    pub summary: String,
}

/// Collect amenities whose type or name contains one of the requested types
///
/// Matching ignores case and the first requested type that matches wins.
pub fn extract_specific_amenities(report: &AnalysisReport, types: &[String]) -> SpecificAmenities {
    let targets: Vec<String> = types.iter().map(|t| t.to_lowercase()).collect();
    let mut total = 0;
    let mut locations = Vec::new();

    for segment in &report.segments {
        let mut amenities_by_type: BTreeMap<String, Vec<MatchedAmenity>> = BTreeMap::new();
        let mut count = 0;

        for amenity in segment.opportunities.iter().filter_map(|o| o.as_amenity()) {
            let amenity_type = amenity.amenity_type.to_lowercase();
            let name = amenity.name.to_lowercase();

            let Some(matched) = targets
                .iter()
                .find(|t| amenity_type.contains(t.as_str()) || name.contains(t.as_str()))
            else {
                continue;
            };

            if amenity.distance_from_route_m > SPECIFIC_MAX_DISTANCE_M {
                continue;
            }

            count += 1;
            amenities_by_type.entry(matched.clone()).or_default().push(MatchedAmenity {
                name: amenity.name.clone(),
                amenity_type: amenity.amenity_type.clone(),
                distance_m: round_to(amenity.distance_from_route_m, 1),
                location: amenity.location,
                matched_type: matched.clone(),
                osm_link: amenity.osm_link.clone(),
            });
        }

        if count > 0 {
            total += count;
            locations.push(MatchingLocation {
                coordinate: segment.coordinate,
                amenities_by_type,
                total_amenities: count,
            });
        }
    }

    SpecificAmenities {
        route_info: report.route_info.clone(),
        requested_amenity_types: types.to_vec(),
        total_matching_amenities: total,
        matching_locations: locations,
        summary: format!("Found {} amenities matching types: {}", total, types.join(", ")),
    }
}

/// An amenity that could serve as a detour point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetourCandidate {
    pub amenity: Amenity,
    pub detour_distance_m: f64,

    /// Sample point the amenity was found from
    pub route_point: Coordinate,
}

/// Flattened view of the chosen detour point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetourPoint {
    pub name: String,
    #[serde(rename = "type")]
    pub amenity_type: String,
    pub lat: f64,
    pub lon: f64,
    pub detour_distance_m: f64,
}

impl From<&DetourCandidate> for DetourPoint {
    fn from(candidate: &DetourCandidate) -> Self {
        Self {
            name: candidate.amenity.name.clone(),
            amenity_type: candidate.amenity.amenity_type.clone(),
            lat: candidate.amenity.location.lat,
            lon: candidate.amenity.location.lon,
            detour_distance_m: candidate.detour_distance_m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetourPointMatch {
    pub detour_point: DetourPoint,
    pub alternatives: Vec<DetourCandidate>,
}

/// Closest amenity of a type, optionally narrowed by name
///
/// Candidates are ordered by detour distance; ties keep sample order.
pub fn find_detour_point(
    report: &AnalysisReport,
    amenity_type: &str,
    name: Option<&str>,
) -> Result<DetourPointMatch> {
    let wanted_type = amenity_type.to_lowercase();
    let wanted_name = name.map(str::to_lowercase);

    let mut candidates: Vec<DetourCandidate> = report
        .segments
        .iter()
        .flat_map(|segment| {
            segment.opportunities.iter().filter_map(move |o| {
                let amenity = o.as_amenity()?;
                Some(DetourCandidate {
                    amenity: amenity.clone(),
                    detour_distance_m: o.detour_distance_m(),
                    route_point: segment.coordinate,
                })
            })
        })
        .filter(|c| c.amenity.amenity_type.to_lowercase().contains(&wanted_type))
        .filter(|c| match &wanted_name {
            Some(wanted) => c.amenity.name.to_lowercase().contains(wanted.as_str()),
            None => true,
        })
        .collect();

    if candidates.is_empty() {
        return Err(WaysideError::NoMatchingAmenity {
            amenity_type: amenity_type.to_string(),
        });
    }

    candidates.sort_by(|a, b| a.detour_distance_m.total_cmp(&b.detour_distance_m));

    let detour_point = DetourPoint::from(&candidates[0]);
    let alternatives = candidates.into_iter().skip(1).take(MAX_ALTERNATIVES).collect();

    Ok(DetourPointMatch {
        detour_point,
        alternatives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisDiagnostics, DetourSummary, RouteSegment};
    use wayside_core::models::{osm_link, Category, DetourOpportunity, ElementKind};

    fn amenity(id: u64, name: &str, amenity_type: &str, distance: f64) -> DetourOpportunity {
        DetourOpportunity::for_amenity(Amenity {
            id,
            source: ElementKind::Node,
            name: name.to_string(),
            amenity_type: amenity_type.to_string(),
            category: Category::Amenity,
            brand: None,
            opening_hours: None,
            location: Coordinate::new(51.0 + id as f64 * 0.001, -114.0),
            distance_from_route_m: distance,
            osm_link: osm_link(ElementKind::Node, id),
            area: None,
        })
    }

    fn report(segments: Vec<Vec<DetourOpportunity>>) -> AnalysisReport {
        AnalysisReport {
            route_info: RouteInfo {
                total_coordinates: 2,
                sampled_points: segments.len(),
                route_distance_km: 1.0,
                start_coordinate: Coordinate::new(51.0, -114.0),
                end_coordinate: Coordinate::new(51.0, -113.99),
            },
            detour_summary: DetourSummary::default(),
            segments: segments
                .into_iter()
                .enumerate()
                .map(|(i, opportunities)| RouteSegment {
                    point_id: i + 1,
                    coordinate: Coordinate::new(51.0, -114.0 + i as f64 * 0.003),
                    opportunities,
                })
                .collect(),
            amenities: Vec::new(),
            ways: Vec::new(),
            diagnostics: AnalysisDiagnostics::default(),
        }
    }

    fn types(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_specific_matches_type_or_name() {
        let input = report(vec![vec![
            amenity(1, "Bean There", "amenity=cafe", 50.0),
            amenity(2, "Cafe Books", "shop=books", 80.0),
            amenity(3, "Bow Pharmacy", "amenity=pharmacy", 90.0),
        ]]);

        let result = extract_specific_amenities(&input, &types(&["Cafe"]));
        assert_eq!(result.total_matching_amenities, 2);

        let location = &result.matching_locations[0];
        assert_eq!(location.amenities_by_type["cafe"].len(), 2);
        assert_eq!(location.amenities_by_type["cafe"][1].name, "Cafe Books");
    }

    #[test]
    fn test_specific_first_requested_type_wins() {
        let input = report(vec![vec![amenity(1, "Pharmacy Cafe", "amenity=cafe", 10.0)]]);
        let result = extract_specific_amenities(&input, &types(&["pharmacy", "cafe"]));

        let location = &result.matching_locations[0];
        assert!(location.amenities_by_type.contains_key("pharmacy"));
        assert!(!location.amenities_by_type.contains_key("cafe"));
        assert_eq!(result.summary, "Found 1 amenities matching types: pharmacy, cafe");
    }

    #[test]
    fn test_specific_distance_cap() {
        let input = report(vec![
            vec![amenity(1, "Near", "amenity=toilets", 300.0)],
            vec![amenity(2, "Far", "amenity=toilets", 300.1)],
        ]);
        let result = extract_specific_amenities(&input, &types(&["toilets"]));

        assert_eq!(result.total_matching_amenities, 1);
        assert_eq!(result.matching_locations.len(), 1);
    }

    #[test]
    fn test_find_detour_point_orders_by_distance() {
        let input = report(vec![
            vec![amenity(1, "Cafe A", "amenity=cafe", 120.0), amenity(2, "Cafe B", "amenity=cafe", 40.0)],
            vec![amenity(3, "Cafe C", "amenity=cafe", 80.0), amenity(4, "Cafe D", "amenity=cafe", 200.0)],
        ]);

        let found = find_detour_point(&input, "CAFE", None).unwrap();
        assert_eq!(found.detour_point.name, "Cafe B");
        assert_eq!(found.detour_point.detour_distance_m, 40.0);

        let alternatives: Vec<&str> =
            found.alternatives.iter().map(|c| c.amenity.name.as_str()).collect();
        assert_eq!(alternatives, vec!["Cafe C", "Cafe A"]);
        assert_eq!(found.alternatives[0].route_point, input.segments[1].coordinate);
    }

    #[test]
    fn test_find_detour_point_by_name() {
        let input = report(vec![vec![
            amenity(1, "Good Earth", "amenity=cafe", 10.0),
            amenity(2, "Phil & Sebastian", "amenity=cafe", 90.0),
        ]]);

        let found = find_detour_point(&input, "cafe", Some("phil")).unwrap();
        assert_eq!(found.detour_point.name, "Phil & Sebastian");
        assert!(found.alternatives.is_empty());
    }

    #[test]
    fn test_find_detour_point_none() {
        let input = report(vec![vec![amenity(1, "Good Earth", "amenity=cafe", 10.0)]]);
        let err = find_detour_point(&input, "bicycle_repair_station", None).unwrap_err();

        assert!(matches!(err, WaysideError::NoMatchingAmenity { .. }));
        assert_eq!(err.to_string(), "No bicycle_repair_station found along route");
    }
}
