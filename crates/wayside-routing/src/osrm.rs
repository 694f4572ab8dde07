use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use wayside_core::config::LayeredConfig;
use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{Coordinate, PlannedRoute, Route, RouteWaypoint, TransportProfile};
use wayside_core::ports::RoutingService;

/// OSRM-compatible routing adapter
pub struct OsrmClient {
    /// Service root (e.g., "http://localhost:5000")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OsrmClient {
    /// Create a client with reqwest's default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost() -> Self {
        Self::new("http://localhost:5000")
    }

    /// Create a client with an overall request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            WaysideError::ConfigInvalid {
                key: "request_timeout_secs".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        match config.request_timeout_secs.value {
            Some(secs) => Self::with_timeout(&config.osrm_url.value, Duration::from_secs(secs)),
            None => Ok(Self::new(&config.osrm_url.value)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a waypoint list
    pub fn route_url(&self, waypoints: &[Coordinate], profile: TransportProfile) -> String {
        let coordinates: Vec<String> = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lon, c.lat))
            .collect();

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.base_url.trim_end_matches('/'),
            profile,
            coordinates.join(";")
        )
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
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

        let url = self.route_url(waypoints, profile);
        tracing::debug!(%profile, waypoints = waypoints.len(), "Requesting route");

        let response = self.client.get(&url).send().await.map_err(|e| WaysideError::Routing {
            reason: format!("Failed to reach routing service at {}: {}", self.base_url, e),
        })?;

        // OSRM answers NoRoute and similar with a 400 and a JSON body carrying the code
        let status = response.status();
        let text = response.text().await.map_err(|e| WaysideError::Routing {
            reason: format!("Failed to read routing response: {}", e),
        })?;

        if !status.is_success() && serde_json::from_str::<OsrmResponse>(&text).is_err() {
            return Err(WaysideError::Routing {
                reason: format!("Routing service error ({}): {}", status, text.trim()),
            });
        }

        decode_route(&text)
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
    weight: Option<f64>,
    weight_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    location: [f64; 2],
    #[serde(default)]
    name: String,
    #[serde(default)]
    distance: f64,
}

/// Decode a routing response body into the best route it contains
///
/// A `code` other than `"Ok"` is a routing error; an `"Ok"` answer without
/// routes is `NoRoute`.
pub fn decode_route(body: &str) -> Result<PlannedRoute> {
    let parsed: OsrmResponse = serde_json::from_str(body).map_err(|e| WaysideError::Routing {
        reason: format!("Failed to parse routing response: {}", e),
    })?;

    if parsed.code == "NoRoute" {
        return Err(WaysideError::NoRoute);
    }

    if parsed.code != "Ok" {
        return Err(WaysideError::Routing {
            reason: match parsed.message {
                Some(message) => format!("{}: {}", parsed.code, message),
                None => parsed.code,
            },
        });
    }

    let best = parsed.routes.into_iter().next().ok_or(WaysideError::NoRoute)?;

    let route = Route {
        coordinates: best
            .geometry
            .coordinates
            .into_iter()
            .map(Coordinate::from_lon_lat)
            .collect(),
        distance_m: Some(best.distance),
        duration_s: Some(best.duration),
    };

    let waypoints = parsed
        .waypoints
        .into_iter()
        .map(|w| RouteWaypoint {
            location: Coordinate::from_lon_lat(w.location),
            name: w.name,
            snap_distance_m: w.distance,
        })
        .collect();

    Ok(PlannedRoute {
        route,
        weight: best.weight,
        weight_name: best.weight_name,
        waypoints,
    })
}
