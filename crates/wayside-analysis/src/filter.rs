//! Report filtering for presentation
//!
//! Both filters walk the saved report's sampling points, keep the amenities
//! worth mentioning and group them by category per point. Only the first few
//! points are listed; the total counts every point.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use wayside_core::models::{Category, Coordinate};
use wayside_core::units::round_to;

use crate::models::RouteInfo;
use crate::report::{SavedAmenity, SavedReport};

/// Need keyword to the amenity types it asks for
const NEED_VOCABULARY: &[(&str, &[&str])] = &[
    // Food and drink
    ("food", &["restaurant", "cafe", "fast_food", "pub", "bar", "bakery"]),
    ("coffee", &["cafe"]),
    ("restaurant", &["restaurant", "fast_food", "pub", "bar"]),
    ("drink", &["pub", "bar", "cafe"]),
    ("eating", &["restaurant", "cafe", "fast_food", "bakery"]),
    // Services
    ("money", &["bank", "atm"]),
    ("bank", &["bank", "atm"]),
    ("atm", &["atm"]),
    ("medical", &["pharmacy", "hospital"]),
    ("pharmacy", &["pharmacy"]),
    ("gas", &["fuel"]),
    ("fuel", &["fuel"]),
    // Necessities
    ("water", &["drinking_water", "water_point", "fountain"]),
    ("toilet", &["toilets"]),
    ("restroom", &["toilets"]),
    ("bathroom", &["toilets"]),
    // Bike services
    ("bike", &["bicycle_parking", "bicycle_rental", "bicycle_repair_station", "bicycle"]),
    ("parking", &["bicycle_parking"]),
    ("repair", &["bicycle_repair_station"]),
    // Recreation
    ("park", &["park", "garden", "nature_reserve"]),
    ("recreation", &["park", "playground", "sports_centre", "swimming_pool"]),
    ("tourist", &["viewpoint", "attraction", "museum", "gallery"]),
    ("shopping", &["convenience", "supermarket", "mall", "shop"]),
];

/// Types used when no need selects anything
const DEFAULT_NEEDS: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "bank",
    "atm",
    "toilets",
    "drinking_water",
    "bicycle_repair_station",
    "park",
    "viewpoint",
];

/// Unnamed amenities of these types are still worth listing for a need
const UNNAMED_NEED_TYPES: &[&str] = &["restaurant", "cafe", "bank", "atm", "park"];

/// Types the general summary always keeps, named or not
const PRIORITY_TYPES: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "pub",
    "bar",
    "bank",
    "atm",
    "pharmacy",
    "hospital",
    "toilets",
    "drinking_water",
    "water_point",
    "fountain",
    "bicycle_parking",
    "bicycle_rental",
    "bicycle_repair_station",
    "park",
    "viewpoint",
    "attraction",
    "museum",
    "gallery",
];

/// Street furniture left out of the general summary
const SKIPPED_TYPES: &[&str] = &["bench", "waste_basket", "recycling", "unknown"];

const GENERAL_MAX_DISTANCE_M: f64 = 200.0;
const NEEDS_MAX_DISTANCE_M: f64 = 250.0;
const DEFAULT_NEEDS_MAX_DISTANCE_M: f64 = 150.0;

const GENERAL_LOCATION_LIMIT: usize = 3;
const NEEDS_LOCATION_LIMIT: usize = 5;

/// An amenity as listed in a filtered summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedAmenity {
    pub name: String,
    #[serde(rename = "type")]
    pub amenity_type: String,
    pub category: Category,
    pub brand: Option<String>,
    pub opening_hours: Option<String>,
    pub distance_m: f64,
    pub location: Coordinate,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_info: BTreeMap<String, String>,
}

impl ListedAmenity {
    fn from_saved(amenity: &SavedAmenity, with_info: bool) -> Self {
        Self {
            name: amenity.name.clone(),
            amenity_type: amenity.amenity_type.clone(),
            category: amenity.category,
            brand: amenity.brand.clone(),
            opening_hours: amenity.opening_hours.clone(),
            distance_m: round_to(amenity.distance_from_route_m, 1),
            location: amenity.location,
            additional_info: if with_info {
                amenity.additional_info.clone()
            } else {
                BTreeMap::new()
            },
        }
    }
}

/// Amenities kept at one sample point, grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityLocation {
    pub coordinate: Coordinate,
    pub amenity_summary: BTreeMap<Category, Vec<ListedAmenity>>,
    pub total_nearby: usize,
}

/// Amenities worth mentioning for a general trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSummary {
    pub route_info: RouteInfo,
    pub total_relevant_amenities: usize,
    pub key_amenity_locations: Vec<AmenityLocation>,
    pub summary: String,
}

/// Amenities matching what the traveller asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsSummary {
    pub route_info: RouteInfo,
    pub user_needs: Vec<String>,

    /// Amenity types searched for, sorted
    pub target_categories: Vec<String>,

    pub total_relevant_amenities: usize,
    pub key_amenity_locations: Vec<AmenityLocation>,
    pub summary: String,
}

/// Result of filtering a report that may not be one
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome<T = NeedsSummary> {
    Filtered(T),

    /// Input without sampling points, returned as given
    Unchanged(serde_json::Value),
}

/// Amenity types selected by a list of needs
///
/// A need selects a vocabulary entry when either contains the other,
/// ignoring case. No needs, or needs matching nothing, select the defaults.
/// The second value is false when the defaults were used.
pub fn target_categories(needs: &[String]) -> (BTreeSet<&'static str>, bool) {
    let mut targets = BTreeSet::new();

    for need in needs {
        let need = need.to_lowercase();
        for (key, types) in NEED_VOCABULARY {
            if need.contains(key) || key.contains(need.as_str()) {
                targets.extend(types.iter().copied());
            }
        }
    }

    if targets.is_empty() {
        (DEFAULT_NEEDS.iter().copied().collect(), false)
    } else {
        (targets, true)
    }
}

fn group_locations<F>(report: &SavedReport, mut keep: F) -> (usize, Vec<AmenityLocation>)
where
    F: FnMut(&SavedAmenity) -> Option<ListedAmenity>,
{
    let mut total = 0;
    let mut locations = Vec::new();

    for point in &report.sampling_points {
        let kept: Vec<ListedAmenity> = point.detours.amenities.iter().filter_map(&mut keep).collect();
        if kept.is_empty() {
            continue;
        }

        total += kept.len();
        let total_nearby = kept.len();
        let mut amenity_summary: BTreeMap<Category, Vec<ListedAmenity>> = BTreeMap::new();
        for amenity in kept {
            amenity_summary.entry(amenity.category).or_default().push(amenity);
        }

        locations.push(AmenityLocation {
            coordinate: point.coordinate,
            amenity_summary,
            total_nearby,
        });
    }

    (total, locations)
}

/// Keep amenities that matter on most trips
pub fn summarize_general(report: &SavedReport) -> GeneralSummary {
    let (total, mut locations) = group_locations(report, |amenity| {
        let is_priority = PRIORITY_TYPES.iter().any(|t| amenity.amenity_type.contains(t));
        if amenity.is_unnamed() && !is_priority {
            return None;
        }
        if SKIPPED_TYPES.iter().any(|t| amenity.amenity_type.contains(t)) {
            return None;
        }
        if amenity.distance_from_route_m > GENERAL_MAX_DISTANCE_M {
            return None;
        }
        Some(ListedAmenity::from_saved(amenity, false))
    });

    locations.truncate(GENERAL_LOCATION_LIMIT);

    GeneralSummary {
        route_info: report.route_info.clone(),
        total_relevant_amenities: total,
        key_amenity_locations: locations,
        summary: format!("Found {} relevant amenities along the route", total),
    }
}

/// Keep amenities matching the traveller's needs
pub fn filter_by_needs(report: &SavedReport, needs: &[String]) -> NeedsSummary {
    let (targets, specific) = target_categories(needs);
    // The tighter cap applies whenever no needs were given
    let max_distance = if needs.is_empty() {
        DEFAULT_NEEDS_MAX_DISTANCE_M
    } else {
        NEEDS_MAX_DISTANCE_M
    };
    tracing::debug!(?targets, specific, max_distance, "Filtering report by needs");

    let (total, mut locations) = group_locations(report, |amenity| {
        let amenity_type = amenity.amenity_type.to_lowercase();
        if !targets.iter().any(|t| amenity_type.contains(t)) {
            return None;
        }
        if amenity.distance_from_route_m > max_distance {
            return None;
        }
        if amenity.is_unnamed() && !UNNAMED_NEED_TYPES.iter().any(|t| amenity_type.contains(t)) {
            return None;
        }
        Some(ListedAmenity::from_saved(amenity, true))
    });

    locations.truncate(NEEDS_LOCATION_LIMIT);

    let described = if needs.is_empty() {
        "general needs".to_string()
    } else {
        needs.join(", ")
    };

    NeedsSummary {
        route_info: report.route_info.clone(),
        user_needs: needs.to_vec(),
        target_categories: targets.iter().map(|t| t.to_string()).collect(),
        total_relevant_amenities: total,
        key_amenity_locations: locations,
        summary: format!("Found {} relevant amenities for: {}", total, described),
    }
}

/// Filter a report given as raw JSON
///
/// Input without `sampling_points`, or that does not decode as a report, is
/// handed back unchanged.
pub fn filter_report_value(value: serde_json::Value, needs: &[String]) -> FilterOutcome {
    with_report_value(value, |report| filter_by_needs(report, needs))
}

/// General summary of a report given as raw JSON, with the same fallback as
/// [`filter_report_value`]
pub fn summarize_report_value(value: serde_json::Value) -> FilterOutcome<GeneralSummary> {
    with_report_value(value, summarize_general)
}

fn with_report_value<T>(
    value: serde_json::Value,
    f: impl FnOnce(&SavedReport) -> T,
) -> FilterOutcome<T> {
    if value.get("sampling_points").is_none() {
        return FilterOutcome::Unchanged(value);
    }

    match serde_json::from_value::<SavedReport>(value.clone()) {
        Ok(report) => FilterOutcome::Filtered(f(&report)),
        Err(e) => {
            tracing::warn!(error = %e, "Input is not a detour report, leaving it unchanged");
            FilterOutcome::Unchanged(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetourSummary;
    use crate::report::{PointDetours, SamplingPoint};

    fn amenity(name: &str, amenity_type: &str, distance: f64) -> SavedAmenity {
        let category = match amenity_type.split('=').next() {
            Some("shop") => Category::Shop,
            Some("leisure") => Category::Leisure,
            Some("tourism") => Category::Tourism,
            _ => Category::Amenity,
        };
        SavedAmenity {
            id: 1,
            name: name.to_string(),
            amenity_type: amenity_type.to_string(),
            category,
            brand: None,
            opening_hours: None,
            distance_from_route_m: distance,
            location: Coordinate::new(51.0, -114.0),
            osm_link: "https://openstreetmap.org/node/1".to_string(),
            additional_info: BTreeMap::new(),
        }
    }

    fn report(points: Vec<Vec<SavedAmenity>>) -> SavedReport {
        SavedReport {
            route_info: RouteInfo {
                total_coordinates: 2,
                sampled_points: points.len(),
                route_distance_km: 1.0,
                start_coordinate: Coordinate::new(51.0, -114.0),
                end_coordinate: Coordinate::new(51.0, -113.99),
            },
            analysis_date: None,
            detour_summary: DetourSummary::default(),
            sampling_points: points
                .into_iter()
                .enumerate()
                .map(|(i, amenities)| SamplingPoint {
                    point_id: i + 1,
                    coordinate: Coordinate::new(51.0, -114.0 + i as f64 * 0.003),
                    detour_count: amenities.len(),
                    detours: PointDetours { amenities, ways: Vec::new() },
                })
                .collect(),
        }
    }

    fn needs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coffee_selects_only_cafes() {
        let (targets, specific) = target_categories(&needs(&["Coffee"]));
        assert!(specific);
        assert_eq!(targets.into_iter().collect::<Vec<_>>(), vec!["cafe"]);
    }

    #[test]
    fn test_substring_match_both_ways() {
        // "toilets" contains "toilet"; "park" is contained in "parking"
        let (targets, _) = target_categories(&needs(&["toilets"]));
        assert!(targets.contains("toilets"));

        let (targets, _) = target_categories(&needs(&["par"]));
        assert!(targets.contains("bicycle_parking"));
        assert!(targets.contains("garden"));
    }

    #[test]
    fn test_empty_and_unknown_needs_fall_back() {
        let (targets, specific) = target_categories(&[]);
        assert!(!specific);
        assert_eq!(targets.len(), DEFAULT_NEEDS.len());

        let (fallback, specific) = target_categories(&needs(&["zeppelin"]));
        assert!(!specific);
        assert_eq!(fallback, targets);
    }

    #[test]
    fn test_distance_caps() {
        let input = report(vec![vec![amenity("Far Cafe", "amenity=cafe", 250.0)]]);

        assert_eq!(summarize_general(&input).total_relevant_amenities, 0);
        assert_eq!(filter_by_needs(&input, &needs(&["coffee"])).total_relevant_amenities, 1);
        assert_eq!(filter_by_needs(&input, &[]).total_relevant_amenities, 0);
    }

    #[test]
    fn test_unnamed_rules() {
        let input = report(vec![vec![
            amenity("Unnamed amenity=cafe", "amenity=cafe", 20.0),
            amenity("Unnamed amenity=toilets", "amenity=toilets", 20.0),
            amenity("Unnamed amenity=bench", "amenity=bench", 20.0),
        ]]);

        // Toilets are a priority type for the general summary but not an
        // unnamed-worthy type for needs
        assert_eq!(summarize_general(&input).total_relevant_amenities, 2);
        assert_eq!(
            filter_by_needs(&input, &needs(&["coffee", "toilet"])).total_relevant_amenities,
            1
        );
    }

    #[test]
    fn test_general_skips_street_furniture() {
        let input = report(vec![vec![
            amenity("Memorial Bench", "amenity=bench", 5.0),
            amenity("Bow Cycle", "shop=bicycle", 40.0),
        ]]);

        let summary = summarize_general(&input);
        assert_eq!(summary.total_relevant_amenities, 1);
        let listed = &summary.key_amenity_locations[0].amenity_summary[&Category::Shop];
        assert_eq!(listed[0].name, "Bow Cycle");
    }

    #[test]
    fn test_location_limits_and_totals() {
        let points: Vec<Vec<SavedAmenity>> =
            (0..7).map(|i| vec![amenity(&format!("Cafe {i}"), "amenity=cafe", 10.0)]).collect();
        let input = report(points);

        let general = summarize_general(&input);
        assert_eq!(general.key_amenity_locations.len(), 3);
        assert_eq!(general.total_relevant_amenities, 7);

        let specific = filter_by_needs(&input, &needs(&["coffee"]));
        assert_eq!(specific.key_amenity_locations.len(), 5);
        assert_eq!(specific.total_relevant_amenities, 7);
        assert_eq!(specific.summary, "Found 7 relevant amenities for: coffee");
    }

    #[test]
    fn test_grouping_by_category() {
        let input = report(vec![vec![
            amenity("Corner Cafe", "amenity=cafe", 10.0),
            amenity("Riverside Park", "leisure=park", 60.0),
            amenity("Beans", "amenity=cafe", 15.0),
        ]]);

        let summary = filter_by_needs(&input, &needs(&["coffee", "park"]));
        let location = &summary.key_amenity_locations[0];
        assert_eq!(location.total_nearby, 3);
        assert_eq!(location.amenity_summary[&Category::Amenity].len(), 2);
        assert_eq!(location.amenity_summary[&Category::Leisure].len(), 1);
    }

    #[test]
    fn test_value_without_sampling_points_is_unchanged() {
        let value = serde_json::json!({"error": "Could not load route coordinates"});
        assert_eq!(
            filter_report_value(value.clone(), &[]),
            FilterOutcome::Unchanged(value)
        );

        let malformed = serde_json::json!({"sampling_points": "nope"});
        assert!(matches!(
            filter_report_value(malformed, &[]),
            FilterOutcome::Unchanged(_)
        ));
    }

    #[test]
    fn test_general_summary_of_non_report_is_unchanged() {
        let value = serde_json::json!({"note": "not a report"});
        assert_eq!(summarize_report_value(value.clone()), FilterOutcome::Unchanged(value));
    }

    #[test]
    fn test_general_summary_of_report_value() {
        let input = report(vec![vec![amenity("Corner Cafe", "amenity=cafe", 10.0)]]);
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            summarize_report_value(value),
            FilterOutcome::Filtered(summarize_general(&input))
        );
    }

    #[test]
    fn test_value_round_trip_filters() {
        let input = report(vec![vec![amenity("Corner Cafe", "amenity=cafe", 10.0)]]);
        let value = serde_json::to_value(&input).unwrap();

        match filter_report_value(value, &needs(&["coffee"])) {
            FilterOutcome::Filtered(summary) => {
                assert_eq!(summary.total_relevant_amenities, 1);
                assert_eq!(summary.target_categories, vec!["cafe".to_string()]);
            }
            other => panic!("expected filtered outcome, got {other:?}"),
        }
    }
}
