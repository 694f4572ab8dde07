mod analysis;
mod health;
mod routes;

pub use analysis::{analyze_needs, analyze_route, analyze_specific, find_detour_point};
pub use health::health_check;
pub use routes::{create_detour_route, create_route, route_through_waypoints};
