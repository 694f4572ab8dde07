//! File formats read and written by Wayside
//!
//! Routes are exchanged as GeoJSON LineString features. Coordinates on disk
//! are `[longitude, latitude]`; everything is converted to [`Coordinate`]
//! on load.
//!
//! [`Coordinate`]: crate::models::Coordinate

pub mod route_file;

pub use route_file::{
    detour_route_feature, extended_route_feature, load_route, parse_route, route_collection,
    route_feature, save_geojson,
};
