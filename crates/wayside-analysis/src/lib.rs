//! Wayside Analysis - Route detour discovery and reporting
//!
//! This crate samples a route, searches around every sample point for
//! amenities and paths, and turns the results into reports and filtered
//! summaries.

pub mod analyzer;
pub mod discovery;
pub mod filter;
pub mod lookup;
pub mod models;
pub mod report;

pub use analyzer::{deduplicate, AnalysisOptions, RouteAnalyzer};
pub use discovery::discover;
pub use filter::{
    filter_by_needs, filter_report_value, summarize_general, summarize_report_value,
    target_categories, FilterOutcome, GeneralSummary, NeedsSummary,
};
pub use lookup::{
    extract_specific_amenities, find_detour_point, DetourCandidate, DetourPoint, DetourPointMatch,
    SpecificAmenities,
};
pub use models::{
    AnalysisDiagnostics, AnalysisReport, DetourSummary, DiscoveryDiagnostics, DiscoveryOutcome,
    RouteInfo, RouteSegment,
};
pub use report::{SavedReport, DEFAULT_REPORT_FILE};
