mod analysis;
mod route;

pub use analysis::AnalysisService;
pub use route::RouteService;
