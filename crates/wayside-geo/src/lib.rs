//! Wayside Geo - Distances, route sampling, and area queries
//!
//! This crate holds the pure geometric building blocks of route analysis:
//! haversine distances, forward sampling of a route at a target spacing,
//! route validation, and the bounding-box queries sent to the map data
//! service.

pub mod area;
pub mod distance;
pub mod sampling;
pub mod spatial;
pub mod validation;

pub use area::{amenity_query, highway_query, path_query, radius_to_degrees};
pub use distance::{haversine_km, haversine_m, path_length_km};
pub use sampling::sample_route;
