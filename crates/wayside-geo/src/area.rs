//! Bounding-box queries around a route point
//!
//! Radii are converted to degrees with a flat `radius_m / 111000`. This is
//! an approximation: it ignores latitude, so boxes become narrower in
//! meters east-west the further a route is from the equator.

use wayside_core::models::{
    AreaQuery, BoundingBox, Coordinate, OutputMode, QueryKind, Selector, TagCondition,
};

/// Meters per degree used for the radius conversion
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Half-width of the highway scan box, in degrees
pub const HIGHWAY_SCAN_BUFFER_DEG: f64 = 0.001;

pub const AMENITY_VALUES: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "pub",
    "bar",
    "fuel",
    "bank",
    "atm",
    "pharmacy",
    "hospital",
    "toilets",
    "drinking_water",
    "bicycle_parking",
    "bicycle_rental",
    "bicycle_repair_station",
    "water_point",
    "fountain",
    "bench",
    "shelter",
    "waste_basket",
    "recycling",
];

pub const SHOP_VALUES: &[&str] = &[
    "convenience",
    "supermarket",
    "bicycle",
    "sports",
    "outdoor",
    "hardware",
    "general",
    "department_store",
    "mall",
    "bakery",
    "butcher",
    "greengrocer",
    "alcohol",
    "beverage",
];

pub const TOURISM_VALUES: &[&str] = &[
    "information",
    "viewpoint",
    "attraction",
    "museum",
    "gallery",
    "artwork",
    "picnic_site",
];

pub const LEISURE_VALUES: &[&str] = &[
    "park",
    "playground",
    "fitness_station",
    "sports_centre",
    "swimming_pool",
    "golf_course",
    "nature_reserve",
    "garden",
    "common",
    "recreation_ground",
    "pitch",
];

pub const NATURAL_VALUES: &[&str] = &[
    "peak",
    "viewpoint",
    "spring",
    "waterfall",
    "beach",
    "cliff",
    "cave_entrance",
];

pub const HISTORIC_VALUES: &[&str] = &[
    "monument",
    "memorial",
    "castle",
    "ruins",
    "archaeological_site",
    "wayside_cross",
    "wayside_shrine",
];

/// Convert a search radius in meters to a degree delta
pub fn radius_to_degrees(radius_m: f64) -> f64 {
    radius_m / METERS_PER_DEGREE
}

/// Search box centered on a point
pub fn search_box(center: Coordinate, radius_m: f64) -> BoundingBox {
    BoundingBox::around(center, radius_to_degrees(radius_m))
}

/// Points of interest around a sample point
///
/// Nodes under any of the six tag families, plus ways (areas such as parks)
/// under tourism, leisure, natural, and historic.
pub fn amenity_query(center: Coordinate, radius_m: f64) -> AreaQuery {
    let families: [(&str, &[&str]); 6] = [
        ("amenity", AMENITY_VALUES),
        ("shop", SHOP_VALUES),
        ("tourism", TOURISM_VALUES),
        ("leisure", LEISURE_VALUES),
        ("natural", NATURAL_VALUES),
        ("historic", HISTORIC_VALUES),
    ];

    let mut selectors: Vec<Selector> = families
        .iter()
        .map(|(key, values)| Selector::node(vec![TagCondition::one_of(key, values)]))
        .collect();

    selectors.extend(
        families
            .iter()
            .filter(|(key, _)| !matches!(*key, "amenity" | "shop"))
            .map(|(key, values)| Selector::way(vec![TagCondition::one_of(key, values)])),
    );

    AreaQuery {
        kind: QueryKind::Amenities,
        bbox: search_box(center, radius_m),
        selectors,
        output: OutputMode::Geometry,
    }
}

/// Cycle-friendly, pedestrian, traffic-calmed, and low-speed ways
pub fn path_query(center: Coordinate, radius_m: f64) -> AreaQuery {
    let selectors = vec![
        Selector::way(vec![TagCondition::equals("highway", "cycleway")]),
        Selector::way(vec![
            TagCondition::equals("highway", "path"),
            TagCondition::one_of("bicycle", &["yes", "designated"]),
        ]),
        Selector::way(vec![
            TagCondition::equals("highway", "footway"),
            TagCondition::equals("bicycle", "yes"),
        ]),
        Selector::way(vec![TagCondition::equals("highway", "pedestrian")]),
        Selector::way(vec![TagCondition::equals("highway", "track")]),
        Selector::way(vec![TagCondition::equals("highway", "service")]),
        Selector::way(vec![TagCondition::exists("cycleway")]),
        Selector::way(vec![TagCondition::equals("bicycle", "designated")]),
        Selector::way(vec![
            TagCondition::equals("highway", "residential"),
            TagCondition::exists("traffic_calming"),
        ]),
        Selector::way(vec![TagCondition::equals("highway", "living_street")]),
        Selector::way(vec![TagCondition::one_of("maxspeed", &["20", "30"])]),
        Selector::way(vec![TagCondition::one_of(
            "highway",
            &["footway", "path", "residential", "tertiary", "secondary", "unclassified"],
        )]),
    ];

    AreaQuery {
        kind: QueryKind::Paths,
        bbox: search_box(center, radius_m),
        selectors,
        output: OutputMode::Geometry,
    }
}

/// Any highway-tagged way in a small fixed box, tags only
pub fn highway_query(center: Coordinate) -> AreaQuery {
    AreaQuery {
        kind: QueryKind::Highways,
        bbox: BoundingBox::around(center, HIGHWAY_SCAN_BUFFER_DEG),
        selectors: vec![Selector::way(vec![TagCondition::exists("highway")])],
        output: OutputMode::TagsOnly,
    }
}
