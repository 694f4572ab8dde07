use std::path::{Path, PathBuf};
use std::sync::Arc;

use wayside_analysis::{AnalysisOptions, RouteAnalyzer};
use wayside_core::config::LayeredConfig;
use wayside_core::error::Result;
use wayside_core::models::TransportProfile;
use wayside_core::ports::{GeoDataSource, RoutingService};
use wayside_osm::OverpassClient;
use wayside_routing::{OsrmClient, RoutePlanner};

use crate::config::DEFAULT_DATA_DIR;
use crate::error::ApiError;

/// Values used when a request leaves them out
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisDefaults {
    pub options: AnalysisOptions,
    pub profile: TransportProfile,
}

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<dyn RoutingService>,
    pub geo: Arc<dyn GeoDataSource>,
    pub defaults: AnalysisDefaults,

    /// Root for `route_file` paths; requests cannot read outside it
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn new(
        router: Arc<dyn RoutingService>,
        geo: Arc<dyn GeoDataSource>,
        defaults: AnalysisDefaults,
    ) -> Self {
        Self {
            router,
            geo,
            defaults,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// State backed by the OSRM and Overpass services named in the config
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        let router = OsrmClient::from_config(config)?;
        let geo = OverpassClient::from_config(config)?;

        tracing::info!(
            osrm = %router.base_url(),
            overpass = %geo.base_url(),
            "Configured external services"
        );

        Ok(Self::new(
            Arc::new(router),
            Arc::new(geo),
            AnalysisDefaults {
                options: AnalysisOptions::from_config(config),
                profile: config.profile.value,
            },
        ))
    }

    pub fn planner(&self) -> RoutePlanner<Arc<dyn RoutingService>, Arc<dyn GeoDataSource>> {
        RoutePlanner::new(self.router.clone(), self.geo.clone())
    }

    pub fn analyzer(&self) -> RouteAnalyzer<Arc<dyn GeoDataSource>> {
        RouteAnalyzer::new(self.geo.clone())
    }

    /// Resolve a requested route file inside the data directory
    ///
    /// Both paths are canonicalized, so `..` segments, absolute paths and
    /// symlinks that leave the directory are rejected.
    pub fn resolve_route_file(&self, requested: &Path) -> std::result::Result<PathBuf, ApiError> {
        let not_found = || {
            ApiError::bad_request("Invalid route")
                .with_details(format!("Route file not found: {}", requested.display()))
        };

        let root = self.data_dir.canonicalize().map_err(|_| not_found())?;
        let resolved = root.join(requested).canonicalize().map_err(|_| not_found())?;

        if !resolved.starts_with(&root) {
            tracing::warn!(requested = %requested.display(), "Route file outside data directory");
            return Err(ApiError::bad_request("Invalid route")
                .with_details("route_file must be inside the route data directory"));
        }

        Ok(resolved)
    }
}
