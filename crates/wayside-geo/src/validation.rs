use wayside_core::error::{Result, WaysideError};
use wayside_core::models::Coordinate;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Convert into an `InvalidRoute` error carrying the first problem
    pub fn into_result(self) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(error) => Err(WaysideError::InvalidRoute {
                reason: format!("{}: {}", error.location, error.reason),
            }),
        }
    }
}

/// Validate route coordinates
///
/// A route needs at least two coordinates, all finite and within WGS84 range.
pub fn validate_route(coordinates: &[Coordinate]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if coordinates.len() < 2 {
        result.add_error(
            "Route".to_string(),
            format!("Route must have at least 2 coordinates, found {}", coordinates.len()),
        );
        return result;
    }

    for (i, coord) in coordinates.iter().enumerate() {
        if !coord.is_finite() {
            result.add_error(format!("Route[{}]", i), "Coordinates must be finite".to_string());
        } else if !coord.in_range() {
            result.add_error(
                format!("Route[{}]", i),
                format!("({}, {}) is outside latitude/longitude range", coord.lat, coord.lon),
            );
        }
    }

    result
}

/// Validate a single waypoint
pub fn validate_coordinate(label: &str, coord: &Coordinate) -> Result<()> {
    if !coord.is_finite() || !coord.in_range() {
        return Err(WaysideError::InvalidRoute {
            reason: format!("{} ({}, {}) is not a valid coordinate", label, coord.lat, coord.lon),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_route() {
        let coords = [Coordinate::new(51.0, -114.0), Coordinate::new(51.1, -114.1)];
        let result = validate_route(&coords);
        assert!(result.is_valid);
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_too_short() {
        let result = validate_route(&[Coordinate::new(0.0, 0.0)]);
        assert!(!result.is_valid);
        assert!(result.errors[0].reason.contains("at least 2"));
    }

    #[test]
    fn test_reports_each_bad_coordinate() {
        let coords = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(f64::NAN, 0.0),
            Coordinate::new(95.0, 0.0),
        ];

        let result = validate_route(&coords);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].location, "Route[1]");
        assert_eq!(result.errors[1].location, "Route[2]");
        assert!(matches!(result.into_result(), Err(WaysideError::InvalidRoute { .. })));
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate("start", &Coordinate::new(10.0, 10.0)).is_ok());
        assert!(validate_coordinate("end", &Coordinate::new(0.0, 200.0)).is_err());
    }
}
