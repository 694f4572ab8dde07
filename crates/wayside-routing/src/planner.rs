//! Route planning on top of the routing and map-data ports
//!
//! The planner adds highway avoidance to plain routing: it scans a route for
//! major roads, inserts waypoints beside them and keeps a reroute only when
//! it passes fewer of them.

use serde::{Deserialize, Serialize};

use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{
    Coordinate, DetourRoute, PlannedRoute, Route, RouteWaypoint, TransportProfile,
};
use wayside_core::ports::{GeoDataSource, RoutingService};
use wayside_core::units::{round_to, METERS_PER_KM, SECONDS_PER_MINUTE};
use wayside_geo::area::highway_query;

/// Highway classes a cycling route should avoid
pub const AVOIDED_HIGHWAYS: &[&str] = &["motorway", "trunk", "primary"];

/// Latitude shift applied to a highway hit to form a detour waypoint
pub const DETOUR_OFFSET_DEG: f64 = 0.005;

/// Highway hits used to build detour waypoints
const MAX_DETOUR_WAYPOINTS: usize = 2;

/// Reroute attempts before falling back to the initial route
const MAX_REROUTE_ATTEMPTS: usize = 3;

/// A major road found near a route coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighwayHit {
    pub way_id: u64,
    pub name: String,
    pub highway_type: String,
    pub coordinate: Coordinate,

    /// Index of the scanned coordinate in the route geometry
    pub point_index: usize,
}

/// Route planner
pub struct RoutePlanner<R, G> {
    router: R,
    geo: G,

    /// Scan every n-th route coordinate for highways
    scan_every: usize,
}

impl<R, G> RoutePlanner<R, G>
where
    R: RoutingService,
    G: GeoDataSource,
{
    pub fn new(router: R, geo: G) -> Self {
        Self {
            router,
            geo,
            scan_every: 20,
        }
    }

    pub fn with_scan_every(mut self, every: usize) -> Self {
        self.scan_every = every.max(1);
        self
    }

    /// Plain route between two points
    pub async fn create_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        self.router.route(&[start, end], profile).await
    }

    /// Route visiting the waypoints in order
    pub async fn route_through(
        &self,
        waypoints: &[Coordinate],
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        if waypoints.len() < 2 {
            return Err(WaysideError::InvalidRoute {
                reason: format!("Need at least 2 waypoints, got {}", waypoints.len()),
            });
        }
        self.router.route(waypoints, profile).await
    }

    /// Find major roads near the route, at most one per scanned coordinate
    ///
    /// Failed lookups are skipped.
    pub async fn scan_highways(&self, coordinates: &[Coordinate]) -> Vec<HighwayHit> {
        let mut hits = Vec::new();

        for (i, coordinate) in coordinates.iter().step_by(self.scan_every).enumerate() {
            let response = match self.geo.query(&highway_query(*coordinate)).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(point = i, error = %e, "Highway lookup failed, skipping point");
                    continue;
                }
            };

            let hit = response.ways.iter().find_map(|way| {
                let highway = way.tags.get("highway")?;
                AVOIDED_HIGHWAYS.contains(&highway.as_str()).then(|| HighwayHit {
                    way_id: way.id,
                    name: way.tags.get("name").cloned().unwrap_or_else(|| "Unnamed".to_string()),
                    highway_type: highway.clone(),
                    coordinate: *coordinate,
                    point_index: i * self.scan_every,
                })
            });

            if let Some(hit) = hit {
                hits.push(hit);
            }
        }

        hits
    }

    /// Route that tries to pass fewer major roads than the direct one
    ///
    /// Each attempt routes through detour waypoints built from the current
    /// hits. The first attempt with fewer hits wins; otherwise the initial
    /// route is returned.
    pub async fn smart_reroute(
        &self,
        start: Coordinate,
        end: Coordinate,
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        let initial = self.router.route(&[start, end], profile).await?;
        tracing::info!(
            distance_km = round_to(initial.distance_km(), 2),
            duration_min = round_to(initial.duration_minutes(), 1),
            "Initial route"
        );

        let mut hits = self.scan_highways(&initial.route.coordinates).await;
        if hits.is_empty() {
            tracing::info!("No highways on route");
            return Ok(initial);
        }

        for attempt in 1..=MAX_REROUTE_ATTEMPTS {
            let waypoints = detour_waypoints(start, end, &hits);
            let candidate = match self.router.route(&waypoints, profile).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Reroute attempt failed");
                    continue;
                }
            };

            let new_hits = self.scan_highways(&candidate.route.coordinates).await;
            if new_hits.len() < hits.len() {
                tracing::info!(attempt, before = hits.len(), after = new_hits.len(), "Reroute reduced highways");
                return Ok(candidate);
            }

            tracing::info!(attempt, highways = new_hits.len(), "Reroute did not reduce highways");
            hits = new_hits;
        }

        tracing::warn!("Could not avoid highways, keeping initial route");
        Ok(initial)
    }

    /// One leg of a detour route; cycling legs avoid highways
    async fn leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        match profile {
            TransportProfile::Bicycle => self.smart_reroute(from, to, profile).await,
            TransportProfile::Foot => self.create_route(from, to, profile).await,
        }
    }

    /// Route from start to end passing through a detour point
    pub async fn create_detour_route(
        &self,
        start: Coordinate,
        detour: Coordinate,
        end: Coordinate,
        profile: TransportProfile,
    ) -> Result<DetourRoute> {
        let first = self.leg(start, detour, profile).await?;
        let second = self.leg(detour, end, profile).await?;
        Ok(combine_legs(start, detour, end, &first, &second))
    }
}

/// Start, a point north of each of the first two hits, then end
pub fn detour_waypoints(start: Coordinate, end: Coordinate, hits: &[HighwayHit]) -> Vec<Coordinate> {
    let mut waypoints = vec![start];
    waypoints.extend(
        hits.iter()
            .take(MAX_DETOUR_WAYPOINTS)
            .map(|hit| hit.coordinate.offset(DETOUR_OFFSET_DEG, 0.0)),
    );
    waypoints.push(end);
    waypoints
}

/// Join two legs sharing the detour point
///
/// The second leg's first coordinate duplicates the first leg's last one
/// and is dropped. Totals add the per-leg rounded figures.
pub fn combine_legs(
    start: Coordinate,
    detour: Coordinate,
    end: Coordinate,
    first: &PlannedRoute,
    second: &PlannedRoute,
) -> DetourRoute {
    let mut coordinates = first.route.coordinates.clone();
    coordinates.extend(second.route.coordinates.iter().skip(1).copied());

    let first_leg_km = round_to(first.distance_km(), 2);
    let second_leg_km = round_to(second.distance_km(), 2);
    let minutes = round_to(first.duration_minutes(), 1) + round_to(second.duration_minutes(), 1);

    let waypoint = |location: Coordinate, name: &str, snapped: Option<&RouteWaypoint>| RouteWaypoint {
        location,
        name: name.to_string(),
        snap_distance_m: snapped.map(|w| w.snap_distance_m).unwrap_or(0.0),
    };

    DetourRoute {
        route: Route {
            coordinates,
            distance_m: Some(round_to(first_leg_km + second_leg_km, 2) * METERS_PER_KM),
            duration_s: Some(round_to(minutes, 1) * SECONDS_PER_MINUTE),
        },
        start: waypoint(start, "Start", first.start_waypoint()),
        detour: waypoint(detour, "Detour", None),
        end: waypoint(end, "End", second.end_waypoint()),
        first_leg_km,
        second_leg_km,
    }
}
