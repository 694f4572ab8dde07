//! Unit helpers shared by reports and route files

pub const METERS_PER_KM: f64 = 1000.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Round half away from zero to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(84.449, 1), 84.4);
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(0.0, 1), 0.0);
    }
}
