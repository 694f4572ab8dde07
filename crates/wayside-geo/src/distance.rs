use wayside_core::models::Coordinate;

/// Earth radius used for every distance in reports, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1.0 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    c * EARTH_RADIUS_KM
}

/// Great-circle distance between two coordinates in meters
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    haversine_km(a, b) * 1000.0
}

/// Sum of consecutive great-circle distances along a path, in kilometers
pub fn path_length_km(coordinates: &[Coordinate]) -> f64 {
    coordinates.windows(2).map(|pair| haversine_km(pair[0], pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine, Point};

    #[test]
    fn test_zero_distance() {
        let c = Coordinate::new(51.0443, -114.2246);
        assert_eq!(haversine_km(c, c), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Paris to London is roughly 344 km
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1276);

        let d = haversine_km(paris, london);
        assert!(d > 339.0 && d < 349.0, "Paris-London distance {} should be ~344km", d);
    }

    #[test]
    fn test_agrees_with_geo_haversine() {
        let a = Coordinate::new(51.044261, -114.224639);
        let b = Coordinate::new(51.040365, -114.209501);

        let ours = haversine_m(a, b);
        let theirs = Haversine.distance(Point::from(a), Point::from(b));

        // geo uses the IUGG mean radius, so allow a small relative difference
        assert!((ours - theirs).abs() / theirs < 1e-4);
    }

    #[test]
    fn test_path_length_is_sum_of_segments() {
        let coords = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.001),
            Coordinate::new(0.0, 0.002),
        ];

        let segment = haversine_km(coords[0], coords[1]);
        assert!((path_length_km(&coords) - 2.0 * segment).abs() < 1e-12);
    }

    #[test]
    fn test_path_length_degenerate() {
        assert_eq!(path_length_km(&[]), 0.0);
        assert_eq!(path_length_km(&[Coordinate::new(1.0, 1.0)]), 0.0);
    }
}
