pub mod coordinate;
pub mod detour;
pub mod osm;
pub mod query;
pub mod route;

pub use coordinate::{BoundingBox, Coordinate};
pub use detour::{Amenity, AreaDetails, Category, DetourKind, DetourOpportunity, WaySegment};
pub use osm::{osm_link, ElementKind, GeoResponse, RawNode, RawWay, Tags};
pub use query::{AreaQuery, OutputMode, QueryKind, Selector, TagCondition};
pub use route::{DetourRoute, PlannedRoute, Route, RouteWaypoint, TransportProfile};
