use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::Coordinate;
use crate::units::round_to;

/// An ordered route geometry with optional routing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub coordinates: Vec<Coordinate>,

    /// Total distance reported by the routing service, in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,

    /// Total duration reported by the routing service, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
}

impl Route {
    /// Route without routing metadata, e.g. loaded from a file
    pub fn from_coordinates(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            distance_m: None,
            duration_s: None,
        }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }
}

/// Travel mode passed to the routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportProfile {
    #[default]
    Bicycle,
    Foot,
}

impl TransportProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportProfile::Bicycle => "bicycle",
            TransportProfile::Foot => "foot",
        }
    }
}

impl fmt::Display for TransportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A waypoint as snapped by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteWaypoint {
    pub location: Coordinate,

    /// Street name of the snapped position (often empty)
    #[serde(default)]
    pub name: String,

    /// Distance between the requested point and the road, in meters
    #[serde(default)]
    pub snap_distance_m: f64,
}

/// A route returned by the routing service together with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub route: Route,
    pub weight: Option<f64>,
    pub weight_name: Option<String>,
    pub waypoints: Vec<RouteWaypoint>,
}

impl PlannedRoute {
    pub fn distance_km(&self) -> f64 {
        self.route.distance_m.unwrap_or(0.0) / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.route.duration_s.unwrap_or(0.0) / 60.0
    }

    pub fn start_waypoint(&self) -> Option<&RouteWaypoint> {
        self.waypoints.first()
    }

    pub fn end_waypoint(&self) -> Option<&RouteWaypoint> {
        self.waypoints.last()
    }
}

/// A start -> detour -> end route stitched together from two legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetourRoute {
    /// Combined geometry with the shared junction coordinate kept once
    pub route: Route,
    pub start: RouteWaypoint,
    pub detour: RouteWaypoint,
    pub end: RouteWaypoint,
    pub first_leg_km: f64,
    pub second_leg_km: f64,
}

impl DetourRoute {
    pub fn distance_km(&self) -> f64 {
        round_to(self.route.distance_m.unwrap_or(0.0) / 1000.0, 2)
    }

    pub fn duration_minutes(&self) -> f64 {
        round_to(self.route.duration_s.unwrap_or(0.0) / 60.0, 1)
    }
}
