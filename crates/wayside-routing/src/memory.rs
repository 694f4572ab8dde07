//! In-memory routing for development and testing.
//!
//! `StaticRouter` draws straight lines between the requested waypoints,
//! densified so that highway scans and sampling have points to work with.
//! Specific waypoint lists can be scripted to return a fixed route.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{Coordinate, PlannedRoute, Route, RouteWaypoint, TransportProfile};
use wayside_core::ports::RoutingService;
use wayside_geo::path_length_km;

/// Assumed cycling speed, meters per second (about 15 km/h)
const BICYCLE_SPEED_MS: f64 = 4.17;

/// Assumed walking speed, meters per second (about 5 km/h)
const FOOT_SPEED_MS: f64 = 1.39;

#[derive(Debug, Clone)]
struct ScriptedRoute {
    waypoints: Vec<Coordinate>,
    response: Option<PlannedRoute>,
}

/// Straight-line router with scriptable answers
#[derive(Debug, Clone)]
pub struct StaticRouter {
    /// Intermediate points inserted on every leg
    points_per_leg: usize,
    scripted: Vec<ScriptedRoute>,
    requests: Arc<RwLock<Vec<Vec<Coordinate>>>>,
}

impl Default for StaticRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticRouter {
    pub fn new() -> Self {
        Self {
            points_per_leg: 9,
            scripted: Vec::new(),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_points_per_leg(mut self, points: usize) -> Self {
        self.points_per_leg = points;
        self
    }

    /// Answer this exact waypoint list with a fixed route
    pub fn with_route(mut self, waypoints: Vec<Coordinate>, route: PlannedRoute) -> Self {
        self.scripted.push(ScriptedRoute {
            waypoints,
            response: Some(route),
        });
        self
    }

    /// Answer this exact waypoint list with `NoRoute`
    pub fn without_route(mut self, waypoints: Vec<Coordinate>) -> Self {
        self.scripted.push(ScriptedRoute {
            waypoints,
            response: None,
        });
        self
    }

    /// Waypoint lists received so far, in call order
    pub fn requests(&self) -> Vec<Vec<Coordinate>> {
        match self.requests.read() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn straight_line(&self, waypoints: &[Coordinate], profile: TransportProfile) -> PlannedRoute {
        let mut coordinates = Vec::new();
        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let steps = self.points_per_leg + 1;
            for step in 0..steps {
                let t = step as f64 / steps as f64;
                coordinates.push(Coordinate::new(
                    from.lat + (to.lat - from.lat) * t,
                    from.lon + (to.lon - from.lon) * t,
                ));
            }
        }
        if let Some(last) = waypoints.last() {
            coordinates.push(*last);
        }

        let distance_m = path_length_km(&coordinates) * 1000.0;
        let speed = match profile {
            TransportProfile::Bicycle => BICYCLE_SPEED_MS,
            TransportProfile::Foot => FOOT_SPEED_MS,
        };

        PlannedRoute {
            route: Route {
                coordinates,
                distance_m: Some(distance_m),
                duration_s: Some(distance_m / speed),
            },
            weight: Some(distance_m / speed),
            weight_name: Some("duration".to_string()),
            waypoints: waypoints
                .iter()
                .map(|c| RouteWaypoint {
                    location: *c,
                    name: String::new(),
                    snap_distance_m: 0.0,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl RoutingService for StaticRouter {
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: TransportProfile,
    ) -> Result<PlannedRoute> {
        if waypoints.len() < 2 {
            return Err(WaysideError::InvalidRoute {
                reason: format!("Routing needs at least 2 waypoints, got {}", waypoints.len()),
            });
        }

        self.requests
            .write()
            .map_err(|_| WaysideError::Routing {
                reason: "static router state poisoned".to_string(),
            })?
            .push(waypoints.to_vec());

        if let Some(scripted) = self.scripted.iter().find(|s| s.waypoints == waypoints) {
            return scripted.response.clone().ok_or(WaysideError::NoRoute);
        }

        Ok(self.straight_line(waypoints, profile))
    }

    fn name(&self) -> &str {
        "static"
    }
}
