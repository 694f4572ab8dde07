//! Routing for Wayside
//!
//! An OSRM-compatible client, an in-memory router for tests, and the
//! planner that composes highway-avoiding and detour routes.

pub mod memory;
pub mod osrm;
pub mod planner;

pub use memory::StaticRouter;
pub use osrm::{decode_route, OsrmClient};
pub use planner::{combine_legs, detour_waypoints, HighwayHit, RoutePlanner};
