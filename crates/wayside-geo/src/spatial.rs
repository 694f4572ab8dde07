use geo::{Centroid, MultiPoint, Point};
use wayside_core::models::Coordinate;

/// Centroid of a set of positions
///
/// Used as the representative location of an area. Returns `None` for an
/// empty slice.
pub fn mean_center(coordinates: &[Coordinate]) -> Option<Coordinate> {
    let points: MultiPoint = coordinates.iter().map(|c| Point::from(*c)).collect();
    points.centroid().map(Coordinate::from)
}

/// Representative member of a way: the node at index `n / 2`
pub fn middle_node(coordinates: &[Coordinate]) -> Option<Coordinate> {
    coordinates.get(coordinates.len() / 2).copied()
}
