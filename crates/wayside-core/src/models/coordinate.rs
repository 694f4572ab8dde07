//! WGS84 coordinates and bounding boxes.
//!
//! Internally every position is a named `lat`/`lon` pair. GeoJSON and the
//! routing service use `[longitude, latitude]` arrays; [`Coordinate::from_lon_lat`]
//! and [`Coordinate::to_lon_lat`] are the only places that ordering is handled.

use geo::Intersects;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON position (`[lon, lat]`)
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self { lat: position[1], lon: position[0] }
    }

    /// Convert to a GeoJSON position (`[lon, lat]`)
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Latitude within ±90 and longitude within ±180
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Shift by a number of degrees in each axis
    pub fn offset(&self, dlat: f64, dlon: f64) -> Self {
        Self::new(self.lat + dlat, self.lon + dlon)
    }
}

impl From<Coordinate> for geo::Coord {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.lon, y: c.lat }
    }
}

impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl From<geo::Point> for Coordinate {
    fn from(p: geo::Point) -> Self {
        Self::new(p.y(), p.x())
    }
}

/// Axis-aligned search area in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { south, west, north, east }
    }

    /// Square box extending `delta_deg` from the center in every direction
    pub fn around(center: Coordinate, delta_deg: f64) -> Self {
        Self::new(
            center.lat - delta_deg,
            center.lon - delta_deg,
            center.lat + delta_deg,
            center.lon + delta_deg,
        )
    }

    /// Inclusive containment check
    pub fn contains(&self, c: &Coordinate) -> bool {
        self.to_rect().intersects(&geo::Point::from(*c))
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn to_rect(&self) -> geo::Rect {
        geo::Rect::new(
            Coordinate::new(self.south, self.west),
            Coordinate::new(self.north, self.east),
        )
    }
}
