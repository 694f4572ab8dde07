//! Wayside OSM - OpenStreetMap data access and tag extraction
//!
//! This crate provides the Overpass adapter for the `GeoDataSource` port, an
//! in-memory source for development and testing, and the extraction rules
//! that turn raw tagged elements into amenities and way segments.

pub mod extract;
pub mod memory;
pub mod overpass;

pub use extract::{extract_area_amenity, extract_point_amenity, extract_way_segment};
pub use memory::StaticGeoSource;
pub use overpass::OverpassClient;
