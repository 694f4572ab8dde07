use wayside_analysis::lookup::DEFAULT_MAX_DETOUR_M;
use wayside_analysis::{
    extract_specific_amenities, filter_by_needs, find_detour_point, summarize_general,
    AnalysisOptions, AnalysisReport, DetourPointMatch, NeedsSummary, SavedReport,
    SpecificAmenities,
};

use crate::dto::{
    AnalysisRequest, AnalysisResponse, DetourPointRequest, NeedsRequest, RouteInput,
    SpecificAmenitiesRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Service for route analysis requests
pub struct AnalysisService;

impl AnalysisService {
    pub async fn general(
        state: &AppState,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError> {
        let report = Self::run(state, request).await?;
        let saved = SavedReport::from_analysis(&report);

        Ok(AnalysisResponse {
            route_info: report.route_info.clone(),
            detour_summary: report.detour_summary,
            diagnostics: report.diagnostics,
            summary: summarize_general(&saved),
            report: request.include_report.then_some(saved),
        })
    }

    pub async fn needs(state: &AppState, request: &NeedsRequest) -> Result<NeedsSummary, ApiError> {
        let report = Self::run(state, &request.analysis).await?;
        let saved = SavedReport::from_analysis(&report);
        Ok(filter_by_needs(&saved, &request.needs))
    }

    pub async fn specific(
        state: &AppState,
        request: &SpecificAmenitiesRequest,
    ) -> Result<SpecificAmenities, ApiError> {
        if request.amenity_types.is_empty() {
            return Err(ApiError::bad_request("amenity_types must not be empty"));
        }

        let report = Self::run(state, &request.analysis).await?;
        Ok(extract_specific_amenities(&report, &request.amenity_types))
    }

    /// Analyze with the detour limit as search radius, then pick the closest match
    pub async fn detour_point(
        state: &AppState,
        request: &DetourPointRequest,
    ) -> Result<DetourPointMatch, ApiError> {
        let radius = request.max_detour_distance_m.unwrap_or(DEFAULT_MAX_DETOUR_M);
        let options = state.defaults.options.with_detour_radius(radius);

        let report = Self::analyze(state, &request.route, &options).await?;
        Ok(find_detour_point(&report, &request.amenity_type, request.name.as_deref())?)
    }

    async fn run(state: &AppState, request: &AnalysisRequest) -> Result<AnalysisReport, ApiError> {
        let mut options = state.defaults.options;
        if let Some(spacing) = request.sample_spacing_m {
            options = options.with_sample_spacing(spacing);
        }
        if let Some(radius) = request.detour_radius_m {
            options = options.with_detour_radius(radius);
        }

        Self::analyze(state, &request.route, &options).await
    }

    async fn analyze(
        state: &AppState,
        route: &RouteInput,
        options: &AnalysisOptions,
    ) -> Result<AnalysisReport, ApiError> {
        let analyzer = state.analyzer();

        let report = match (&route.route_file, &route.coordinates) {
            (Some(path), None) => {
                let path = state.resolve_route_file(path)?;
                analyzer.analyze(&path, options).await?
            }
            (None, Some(coordinates)) => analyzer.analyze_coordinates(coordinates, options).await?,
            _ => {
                return Err(ApiError::bad_request("Invalid route")
                    .with_details("Provide exactly one of route_file or coordinates"))
            }
        };

        tracing::info!(
            sampled_points = report.route_info.sampled_points,
            detours = report.detour_summary.total_detours,
            "Analysis finished"
        );
        Ok(report)
    }
}
