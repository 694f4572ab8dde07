//! End-to-end analysis against an in-memory map

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use wayside_analysis::{
    filter_by_needs, find_detour_point, summarize_general, AnalysisOptions, RouteAnalyzer,
    SavedReport,
};
use wayside_core::error::WaysideError;
use wayside_core::models::{Coordinate, DetourKind, RawNode, RawWay, Tags};
use wayside_geo::haversine_km;
use wayside_osm::StaticGeoSource;

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Straight eastbound route along the equator, about 1.1 km long
fn route() -> Vec<Coordinate> {
    (0..=10).map(|i| Coordinate::new(0.0, i as f64 * 0.001)).collect()
}

fn map() -> StaticGeoSource {
    StaticGeoSource::new()
        .with_node(RawNode {
            id: 100,
            lat: Some(0.0005),
            lon: Some(0.0002),
            tags: tags(&[("amenity", "cafe"), ("name", "Equator Espresso")]),
        })
        .with_node(RawNode {
            id: 101,
            lat: Some(-0.0008),
            lon: Some(0.0095),
            tags: tags(&[("amenity", "drinking_water")]),
        })
        .with_way(RawWay {
            id: 200,
            nodes: vec![
                Some(Coordinate::new(0.0003, 0.004)),
                Some(Coordinate::new(0.0003, 0.005)),
                Some(Coordinate::new(0.0013, 0.005)),
                Some(Coordinate::new(0.0013, 0.004)),
            ],
            tags: tags(&[("leisure", "park"), ("name", "Meridian Park")]),
        })
        .with_way(RawWay {
            id: 300,
            nodes: (0..=10)
                .map(|i| Some(Coordinate::new(-0.0002, i as f64 * 0.001)))
                .collect(),
            tags: tags(&[("highway", "cycleway"), ("surface", "asphalt")]),
        })
}

fn write_route(dir: &TempDir, coordinates: &[Coordinate]) -> PathBuf {
    let positions: Vec<[f64; 2]> = coordinates.iter().map(|c| c.to_lon_lat()).collect();
    let feature = serde_json::json!({
        "type": "Feature",
        "properties": {},
        "geometry": {"type": "LineString", "coordinates": positions}
    });
    let path = dir.path().join("route.json");
    fs::write(&path, feature.to_string()).unwrap();
    path
}

#[tokio::test]
async fn test_route_distance_uses_all_coordinates() {
    let coords = vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 0.001),
        Coordinate::new(0.0, 0.002),
    ];
    let analyzer = RouteAnalyzer::new(StaticGeoSource::new());

    let report = analyzer
        .analyze_coordinates(&coords, &AnalysisOptions::default())
        .await
        .unwrap();

    let segment = haversine_km(coords[0], coords[1]);
    let expected = (2.0 * segment * 100.0).round() / 100.0;
    assert_eq!(report.route_info.route_distance_km, expected);
    assert_eq!(report.route_info.total_coordinates, 3);
}

#[tokio::test]
async fn test_no_detours() {
    let source = StaticGeoSource::new();
    let analyzer = RouteAnalyzer::new(source.clone());
    let report = analyzer
        .analyze_coordinates(&route(), &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(report.detour_summary.total_detours, 0);
    assert_eq!(report.segments.len(), report.route_info.sampled_points);

    // One amenity and one path query per sample point
    assert_eq!(source.call_count(), 2 * report.route_info.sampled_points);
    assert!(report.segments.iter().all(|s| s.detour_count() == 0));

    let saved = SavedReport::from_analysis(&report);
    assert_eq!(saved.sampling_points.len(), report.route_info.sampled_points);
    assert!(saved.sampling_points.iter().all(|p| p.detour_count == 0));
}

#[tokio::test]
async fn test_analysis_finds_and_deduplicates() {
    let analyzer = RouteAnalyzer::new(map());
    let report = analyzer
        .analyze_coordinates(&route(), &AnalysisOptions::default())
        .await
        .unwrap();

    // 300 m spacing over ~1.1 km keeps the start, three interior points and the end
    assert_eq!(report.route_info.sampled_points, 5);
    assert_eq!(report.segments[0].point_id, 1);

    assert_eq!(report.detour_summary.amenity_detours, 3);
    assert_eq!(report.detour_summary.way_detours, 1);
    assert_eq!(report.detour_summary.total_detours, 4);

    // The cycleway runs along the whole route, so every point sees it
    let sightings = report
        .segments
        .iter()
        .flat_map(|s| &s.opportunities)
        .filter(|o| o.kind() == DetourKind::Way)
        .count();
    assert_eq!(sightings, 5);

    // First sighting wins: the cycleway was first seen from the start point
    let way = &report.ways[0];
    let first_seen = report.segments[0]
        .opportunities
        .iter()
        .find(|o| o.kind() == DetourKind::Way)
        .unwrap();
    assert_eq!(way, first_seen);

    assert_eq!(report.diagnostics.area_amenities_extracted, 2);
    assert_eq!(report.diagnostics.failed_points, 0);
}

#[tokio::test]
async fn test_concurrency_keeps_results_identical() {
    let analyzer = RouteAnalyzer::new(map());
    let sequential = analyzer
        .analyze_coordinates(&route(), &AnalysisOptions::default())
        .await
        .unwrap();

    let options = AnalysisOptions {
        concurrency: 4,
        ..AnalysisOptions::default()
    };
    let concurrent = analyzer.analyze_coordinates(&route(), &options).await.unwrap();

    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn test_query_failure_does_not_abort() {
    let analyzer = RouteAnalyzer::new(map().failing_near(Coordinate::new(0.0, 0.01)));
    let report = analyzer
        .analyze_coordinates(&route(), &AnalysisOptions::default())
        .await
        .unwrap();

    let last = report.segments.last().unwrap();
    assert_eq!(last.detour_count(), 0);
    assert!(report.diagnostics.failed_points >= 1);
    assert!(report.detour_summary.total_detours > 0);
}

#[tokio::test]
async fn test_analyze_file_and_save() {
    let dir = TempDir::new().unwrap();
    let path = write_route(&dir, &route());
    let analyzer = RouteAnalyzer::new(map());

    let report = analyzer.analyze(&path, &AnalysisOptions::default()).await.unwrap();
    assert_eq!(report.route_info.start_coordinate, Coordinate::new(0.0, 0.0));

    let saved = SavedReport::from_analysis(&report);
    let out = dir.path().join("detour_opportunities.json");
    saved.save(&out).unwrap();

    let reloaded = SavedReport::load(&out).unwrap();
    assert_eq!(reloaded.sampling_points.len(), 5);

    let general = summarize_general(&reloaded);
    assert!(general.total_relevant_amenities >= 2);

    let coffee = filter_by_needs(&reloaded, &["coffee".to_string()]);
    assert!(coffee.total_relevant_amenities >= 1);
    assert!(coffee
        .key_amenity_locations
        .iter()
        .flat_map(|l| l.amenity_summary.values().flatten())
        .all(|a| a.amenity_type.contains("cafe")));
}

#[tokio::test]
async fn test_find_detour_point_from_analysis() {
    let analyzer = RouteAnalyzer::new(map());
    let options = AnalysisOptions::default().with_detour_radius(300.0);
    let report = analyzer.analyze_coordinates(&route(), &options).await.unwrap();

    let found = find_detour_point(&report, "park", None).unwrap();
    assert_eq!(found.detour_point.name, "Meridian Park");

    let err = find_detour_point(&report, "pharmacy", None).unwrap_err();
    assert!(matches!(err, WaysideError::NoMatchingAmenity { .. }));
}

#[tokio::test]
async fn test_malformed_route_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"type": "Feature", "properties": {}}"#).unwrap();

    let analyzer = RouteAnalyzer::new(map());
    let err = analyzer.analyze(&path, &AnalysisOptions::default()).await.unwrap_err();
    assert!(matches!(err, WaysideError::RouteLoad { .. }));
}

#[tokio::test]
async fn test_single_point_route_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_route(&dir, &[Coordinate::new(0.0, 0.0)]);

    let analyzer = RouteAnalyzer::new(map());
    let err = analyzer.analyze(&path, &AnalysisOptions::default()).await.unwrap_err();
    assert!(matches!(err, WaysideError::RouteLoad { .. }));
}
