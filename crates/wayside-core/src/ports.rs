//! Port trait definitions
//!
//! These traits define the interfaces that the external service adapters
//! implement. Both services are reached over the network, so the ports are
//! async and shareable across tasks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{AreaQuery, Coordinate, GeoResponse, PlannedRoute, TransportProfile};

/// Port for querying raw map elements inside an area
#[async_trait]
pub trait GeoDataSource: Send + Sync {
    /// Execute an area query
    ///
    /// An empty response is a valid answer, not an error.
    async fn query(&self, query: &AreaQuery) -> Result<GeoResponse>;

    /// Human-readable backend name for logs and diagnostics
    fn name(&self) -> &str;
}

/// Port for turn-by-turn routing
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Route through the given waypoints in order
    ///
    /// # Arguments
    /// * `waypoints` - At least two coordinates
    /// * `profile` - Travel mode
    ///
    /// # Returns
    /// The best route, or `NoRoute` when the service found none
    async fn route(&self, waypoints: &[Coordinate], profile: TransportProfile)
        -> Result<PlannedRoute>;

    fn name(&self) -> &str;
}

#[async_trait]
impl<T: GeoDataSource + ?Sized> GeoDataSource for Arc<T> {
    async fn query(&self, query: &AreaQuery) -> Result<GeoResponse> {
        (**self).query(query).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: RoutingService + ?Sized> RoutingService for Arc<T> {
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        (**self).route(waypoints, profile).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
