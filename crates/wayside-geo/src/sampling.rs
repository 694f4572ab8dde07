use wayside_core::models::Coordinate;

use crate::distance::haversine_m;

/// Pick route coordinates roughly `spacing_m` apart
///
/// Greedy forward pass: the first coordinate is always taken, and each later
/// coordinate is taken once it is at least `spacing_m` from the last one
/// taken. The final coordinate is appended when its index was not taken,
/// even if an earlier coordinate has the same value (closed loops keep their
/// end point).
pub fn sample_route(coordinates: &[Coordinate], spacing_m: f64) -> Vec<Coordinate> {
    let Some(&first) = coordinates.first() else {
        return Vec::new();
    };

    let mut sampled = vec![first];
    let mut last_taken = first;
    let mut last_index_taken = coordinates.len() == 1;

    for (idx, &current) in coordinates.iter().enumerate().skip(1) {
        if haversine_m(last_taken, current) >= spacing_m {
            sampled.push(current);
            last_taken = current;
            last_index_taken = idx == coordinates.len() - 1;
        }
    }

    if !last_index_taken {
        if let Some(&last) = coordinates.last() {
            sampled.push(last);
        }
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, step_deg: f64) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(0.0, i as f64 * step_deg)).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(sample_route(&[], 100.0).is_empty());

        let single = [Coordinate::new(1.0, 2.0)];
        assert_eq!(sample_route(&single, 100.0), single.to_vec());
    }

    #[test]
    fn test_dense_route_keeps_endpoints() {
        // ~11 m between neighbours, far below the spacing
        let coords = line(10, 0.0001);
        let sampled = sample_route(&coords, 300.0);

        assert_eq!(sampled.len(), 2);
        assert_eq!(sampled[0], coords[0]);
        assert_eq!(sampled[1], coords[9]);
    }

    #[test]
    fn test_sparse_route_takes_every_point() {
        // ~111 m between neighbours
        let coords = line(5, 0.001);
        let sampled = sample_route(&coords, 100.0);
        assert_eq!(sampled, coords);
    }

    #[test]
    fn test_spacing_measured_from_last_taken() {
        // ~111 m steps; with 200 m spacing every second point is taken
        let coords = line(7, 0.001);
        let sampled = sample_route(&coords, 200.0);

        assert_eq!(sampled, vec![coords[0], coords[2], coords[4], coords[6]]);
    }

    #[test]
    fn test_closed_loop_keeps_final_point() {
        let start = Coordinate::new(51.0, -114.0);
        let coords = vec![
            start,
            Coordinate::new(51.0, -113.999),
            Coordinate::new(51.001, -113.999),
            start,
        ];

        let sampled = sample_route(&coords, 10_000.0);
        assert_eq!(sampled.len(), 2);
        assert_eq!(sampled[0], start);
        assert_eq!(sampled[1], start);
    }
}
