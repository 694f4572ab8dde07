//! Detour discovery around a single sample point

use wayside_core::error::Result;
use wayside_core::models::{Coordinate, DetourOpportunity, GeoResponse};
use wayside_core::ports::GeoDataSource;
use wayside_geo::{amenity_query, haversine_m, path_query};
use wayside_osm::{extract_area_amenity, extract_point_amenity, extract_way_segment};

use crate::models::{DiscoveryDiagnostics, DiscoveryOutcome};

/// Query amenities and paths around `point` and package them as opportunities
///
/// Never fails: a query error is logged and the point yields no
/// opportunities, with `query_failed` set in the diagnostics.
pub async fn discover<G>(source: &G, point: Coordinate, radius_m: f64) -> DiscoveryOutcome
where
    G: GeoDataSource + ?Sized,
{
    let (amenities, paths) = match run_queries(source, point, radius_m).await {
        Ok(responses) => responses,
        Err(e) => {
            tracing::warn!(
                lat = point.lat,
                lon = point.lon,
                source = source.name(),
                error = %e,
                "Detour search failed, skipping point"
            );
            return DiscoveryOutcome {
                opportunities: Vec::new(),
                diagnostics: DiscoveryDiagnostics {
                    query_failed: true,
                    ..Default::default()
                },
            };
        }
    };

    let mut diagnostics = DiscoveryDiagnostics::default();
    let mut opportunities = Vec::new();

    for node in &amenities.nodes {
        match extract_point_amenity(node, point) {
            Some(amenity) => opportunities.push(DetourOpportunity::for_amenity(amenity)),
            None => diagnostics.point_amenities_skipped += 1,
        }
    }

    for way in &amenities.ways {
        match extract_area_amenity(way, point) {
            Some(amenity) => {
                diagnostics.area_amenities_extracted += 1;
                opportunities.push(DetourOpportunity::for_amenity(amenity));
            }
            None => {
                tracing::debug!(way = way.id, "Area amenity has too few resolved nodes");
                diagnostics.area_amenities_skipped += 1;
            }
        }
    }

    for way in &paths.ways {
        match extract_way_segment(way) {
            Some(segment) => {
                diagnostics.ways_extracted += 1;
                let distance = haversine_m(point, segment.middle_node);
                opportunities.push(DetourOpportunity::for_way(segment, distance));
            }
            None => {
                tracing::debug!(way = way.id, "Path segment has too few resolved nodes");
                diagnostics.ways_skipped += 1;
            }
        }
    }

    tracing::debug!(
        lat = point.lat,
        lon = point.lon,
        found = opportunities.len(),
        "Detour search complete"
    );

    DiscoveryOutcome {
        opportunities,
        diagnostics,
    }
}

async fn run_queries<G>(
    source: &G,
    point: Coordinate,
    radius_m: f64,
) -> Result<(GeoResponse, GeoResponse)>
where
    G: GeoDataSource + ?Sized,
{
    let amenities = source.query(&amenity_query(point, radius_m)).await?;
    let paths = source.query(&path_query(point, radius_m)).await?;
    Ok((amenities, paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayside_core::models::{DetourKind, QueryKind, RawNode, RawWay, Tags};
    use wayside_osm::StaticGeoSource;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn source() -> StaticGeoSource {
        StaticGeoSource::new()
            .with_node(RawNode {
                id: 1,
                lat: Some(0.001),
                lon: Some(0.0),
                tags: tags(&[("amenity", "cafe"), ("name", "Corner Cafe")]),
            })
            .with_way(RawWay {
                id: 2,
                nodes: vec![
                    Some(Coordinate::new(0.0, 0.0005)),
                    Some(Coordinate::new(0.0005, 0.0005)),
                    Some(Coordinate::new(0.0005, 0.001)),
                ],
                tags: tags(&[("leisure", "park")]),
            })
            .with_way(RawWay {
                id: 3,
                nodes: vec![Some(Coordinate::new(0.0, 0.0)), None],
                tags: tags(&[("leisure", "garden")]),
            })
            .with_way(RawWay {
                id: 4,
                nodes: vec![
                    Some(Coordinate::new(-0.001, 0.0)),
                    Some(Coordinate::new(0.0, 0.0)),
                    Some(Coordinate::new(0.001, 0.0)),
                ],
                tags: tags(&[("highway", "cycleway")]),
            })
    }

    #[tokio::test]
    async fn test_discover_orders_points_areas_ways() {
        let outcome = discover(&source(), Coordinate::new(0.0, 0.0), 200.0).await;

        let kinds: Vec<(DetourKind, u64)> =
            outcome.opportunities.iter().map(|o| (o.kind(), o.id())).collect();
        assert_eq!(
            kinds,
            vec![(DetourKind::Amenity, 1), (DetourKind::Amenity, 2), (DetourKind::Way, 4)]
        );

        assert_eq!(outcome.opportunities[0].description(), "Corner Cafe (amenity=cafe) - 111m from route");
        // Middle node of the cycleway sits on the sample point
        assert_eq!(outcome.opportunities[2].detour_distance_m(), 0.0);

        assert_eq!(outcome.diagnostics.area_amenities_extracted, 1);
        assert_eq!(outcome.diagnostics.area_amenities_skipped, 1);
        assert_eq!(outcome.diagnostics.ways_extracted, 1);
        assert!(!outcome.diagnostics.query_failed);
    }

    #[tokio::test]
    async fn test_query_failure_yields_empty_outcome() {
        let failing = source().failing_on(QueryKind::Paths);
        let outcome = discover(&failing, Coordinate::new(0.0, 0.0), 200.0).await;

        assert!(outcome.opportunities.is_empty());
        assert!(outcome.diagnostics.query_failed);
    }

    #[tokio::test]
    async fn test_empty_area_is_not_an_error() {
        let outcome = discover(&source(), Coordinate::new(10.0, 10.0), 200.0).await;
        assert!(outcome.opportunities.is_empty());
        assert!(!outcome.diagnostics.query_failed);
    }
}
