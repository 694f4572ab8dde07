use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::Path;

use wayside_core::config::{LayeredConfig, DEFAULT_DETOUR_RADIUS_M, DEFAULT_SAMPLE_SPACING_M};
use wayside_core::error::{Result, WaysideError};
use wayside_core::formats::load_route;
use wayside_core::models::{Coordinate, DetourKind, DetourOpportunity};
use wayside_core::ports::GeoDataSource;
use wayside_core::units::round_to;
use wayside_geo::validation::validate_route;
use wayside_geo::{path_length_km, sample_route};

use crate::discovery::discover;
use crate::models::{AnalysisDiagnostics, AnalysisReport, DetourSummary, RouteInfo, RouteSegment};

/// Tuning parameters for a route analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Target distance between sample points, in meters
    pub sample_spacing_m: f64,

    /// Search radius around each sample point, in meters
    pub detour_radius_m: f64,

    /// Sample points searched at once; 1 is strictly sequential
    pub concurrency: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_spacing_m: DEFAULT_SAMPLE_SPACING_M,
            detour_radius_m: DEFAULT_DETOUR_RADIUS_M,
            concurrency: 1,
        }
    }
}

impl AnalysisOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            sample_spacing_m: config.sample_spacing_m.value,
            detour_radius_m: config.detour_radius_m.value,
            concurrency: config.concurrency.value,
        }
    }

    pub fn with_detour_radius(mut self, radius_m: f64) -> Self {
        self.detour_radius_m = radius_m;
        self
    }

    pub fn with_sample_spacing(mut self, spacing_m: f64) -> Self {
        self.sample_spacing_m = spacing_m;
        self
    }
}

/// Route analyzer
pub struct RouteAnalyzer<G> {
    source: G,
}

impl<G: GeoDataSource> RouteAnalyzer<G> {
    pub fn new(source: G) -> Self {
        Self { source }
    }

    /// Analyze the route stored in a GeoJSON file
    pub async fn analyze(&self, path: &Path, options: &AnalysisOptions) -> Result<AnalysisReport> {
        let route = load_route(path)?;
        tracing::info!(
            path = %path.display(),
            coordinates = route.len(),
            "Analyzing route"
        );

        validate_route(&route.coordinates).into_result().map_err(|e| {
            WaysideError::route_load(path, e.to_string())
        })?;

        self.analyze_coordinates(&route.coordinates, options).await
    }

    /// Analyze an already loaded route geometry
    pub async fn analyze_coordinates(
        &self,
        coordinates: &[Coordinate],
        options: &AnalysisOptions,
    ) -> Result<AnalysisReport> {
        validate_route(coordinates).into_result()?;
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(options.sample_spacing_m) || !positive(options.detour_radius_m) {
            return Err(WaysideError::ConfigInvalid {
                key: "analysis".to_string(),
                reason: "sample spacing and detour radius must be positive finite distances"
                    .to_string(),
            });
        }

        let sampled = sample_route(coordinates, options.sample_spacing_m);
        tracing::info!(
            sample_points = sampled.len(),
            spacing_m = options.sample_spacing_m,
            radius_m = options.detour_radius_m,
            "Searching for detours"
        );

        // Ordered buffering keeps results in sample order whatever the concurrency
        let outcomes: Vec<_> = stream::iter(sampled.iter().copied())
            .map(|point| discover(&self.source, point, options.detour_radius_m))
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

        let mut diagnostics = AnalysisDiagnostics::default();
        let segments: Vec<RouteSegment> = sampled
            .iter()
            .zip(outcomes)
            .enumerate()
            .map(|(i, (point, outcome))| {
                diagnostics.absorb(&outcome.diagnostics);
                RouteSegment {
                    point_id: i + 1,
                    coordinate: *point,
                    opportunities: outcome.opportunities,
                }
            })
            .collect();

        if diagnostics.failed_points > 0 {
            tracing::warn!(
                failed = diagnostics.failed_points,
                total = segments.len(),
                "Some sample points could not be searched"
            );
        }

        let unique = deduplicate(segments.iter().flat_map(|s| s.opportunities.iter()));
        let (amenities, ways): (Vec<_>, Vec<_>) =
            unique.into_iter().partition(|o| o.kind() == DetourKind::Amenity);

        let detour_summary = DetourSummary {
            total_detours: amenities.len() + ways.len(),
            amenity_detours: amenities.len(),
            way_detours: ways.len(),
        };
        tracing::info!(
            amenities = detour_summary.amenity_detours,
            ways = detour_summary.way_detours,
            "Analysis complete"
        );

        let route_info = RouteInfo {
            total_coordinates: coordinates.len(),
            sampled_points: sampled.len(),
            route_distance_km: round_to(path_length_km(coordinates), 2),
            start_coordinate: coordinates[0],
            end_coordinate: coordinates[coordinates.len() - 1],
        };

        Ok(AnalysisReport {
            route_info,
            detour_summary,
            segments,
            amenities,
            ways,
            diagnostics,
        })
    }
}

/// Keep the first opportunity for every `"{kind}_{id}"` key, preserving order
pub fn deduplicate<'a>(
    opportunities: impl IntoIterator<Item = &'a DetourOpportunity>,
) -> Vec<DetourOpportunity> {
    let mut seen = HashSet::new();
    opportunities
        .into_iter()
        .filter(|o| seen.insert(o.dedup_key()))
        .cloned()
        .collect()
}
