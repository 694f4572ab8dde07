//! Raw tagged elements to normalized records
//!
//! Extraction is pure: malformed elements yield `None` and the caller counts
//! them.

use std::collections::BTreeMap;

use wayside_core::models::{
    osm_link, Amenity, AreaDetails, Category, Coordinate, ElementKind, RawNode, RawWay, Tags,
    WaySegment,
};
use wayside_core::units::round_to;
use wayside_geo::distance::haversine_m;
use wayside_geo::spatial::{mean_center, middle_node};

/// Tag keys checked in order when classifying a point
const POINT_RULES: &[(&str, Category)] = &[
    ("amenity", Category::Amenity),
    ("shop", Category::Shop),
    ("tourism", Category::Tourism),
    ("leisure", Category::Leisure),
    ("natural", Category::Natural),
    ("historic", Category::Historic),
];

/// Tag keys checked in order when classifying an area
const AREA_RULES: &[(&str, Category)] = &[
    ("tourism", Category::Tourism),
    ("leisure", Category::Leisure),
    ("natural", Category::Natural),
    ("historic", Category::Historic),
    ("amenity", Category::Amenity),
    ("shop", Category::Shop),
];

fn classify(tags: &Tags, rules: &[(&str, Category)]) -> (String, Category) {
    for (key, category) in rules {
        if let Some(value) = tags.get(*key) {
            return (format!("{}={}", key, value), *category);
        }
    }
    ("unknown".to_string(), Category::Other)
}

fn tag(tags: &Tags, key: &str) -> String {
    tags.get(key).cloned().unwrap_or_default()
}

fn display_name(tags: &Tags, amenity_type: &str) -> String {
    tags.get("name").cloned().unwrap_or_else(|| format!("Unnamed {}", amenity_type))
}

/// Category-specific attributes for area amenities
fn additional_info(tags: &Tags, category: Category) -> BTreeMap<String, String> {
    let fields: &[(&str, &str, &str)] = match category {
        Category::Leisure => &[
            ("park_type", "park:type", ""),
            ("access", "access", "public"),
            ("sport", "sport", ""),
        ],
        Category::Natural => &[("elevation", "ele", ""), ("natural_type", "natural", "")],
        Category::Tourism => &[("tourism_type", "tourism", ""), ("wheelchair", "wheelchair", "")],
        Category::Historic => &[("historic_type", "historic", ""), ("heritage", "heritage", "")],
        _ => &[],
    };

    fields
        .iter()
        .map(|(name, key, default)| {
            let value = tags.get(*key).cloned().unwrap_or_else(|| default.to_string());
            (name.to_string(), value)
        })
        .collect()
}

/// Build an amenity from a tagged point
///
/// Returns `None` when the node has no position.
pub fn extract_point_amenity(node: &RawNode, reference: Coordinate) -> Option<Amenity> {
    let location = node.location()?;
    let (amenity_type, category) = classify(&node.tags, POINT_RULES);

    Some(Amenity {
        id: node.id,
        source: ElementKind::Node,
        name: display_name(&node.tags, &amenity_type),
        amenity_type,
        category,
        brand: node.tags.get("brand").cloned(),
        opening_hours: node.tags.get("opening_hours").cloned(),
        location,
        distance_from_route_m: round_to(haversine_m(reference, location), 1),
        osm_link: osm_link(ElementKind::Node, node.id),
        area: None,
    })
}

/// Build an amenity from a tagged area, located at the mean of its nodes
///
/// Returns `None` when fewer than two member nodes resolved.
pub fn extract_area_amenity(way: &RawWay, reference: Coordinate) -> Option<Amenity> {
    let nodes = way.resolved_nodes();
    if nodes.len() < 2 {
        return None;
    }

    let location = mean_center(&nodes)?;
    let (amenity_type, category) = classify(&way.tags, AREA_RULES);

    Some(Amenity {
        id: way.id,
        source: ElementKind::Way,
        name: display_name(&way.tags, &amenity_type),
        amenity_type,
        category,
        brand: way.tags.get("brand").cloned(),
        opening_hours: way.tags.get("opening_hours").cloned(),
        location,
        distance_from_route_m: round_to(haversine_m(reference, location), 1),
        osm_link: osm_link(ElementKind::Way, way.id),
        area: Some(AreaDetails {
            node_count: nodes.len(),
            website: way.tags.get("website").cloned(),
            phone: way.tags.get("phone").cloned(),
            additional_info: additional_info(&way.tags, category),
        }),
    })
}

/// Build a path segment represented by its middle node
///
/// Returns `None` when fewer than two member nodes resolved.
pub fn extract_way_segment(way: &RawWay) -> Option<WaySegment> {
    let nodes = way.resolved_nodes();
    if nodes.len() < 2 {
        return None;
    }

    let highway = way.tags.get("highway").cloned().unwrap_or_else(|| "unknown".to_string());

    Some(WaySegment {
        id: way.id,
        highway,
        name: tag(&way.tags, "name"),
        maxspeed: tag(&way.tags, "maxspeed"),
        surface: tag(&way.tags, "surface"),
        bicycle: tag(&way.tags, "bicycle"),
        foot: tag(&way.tags, "foot"),
        middle_node: middle_node(&nodes)?,
        node_count: nodes.len(),
        osm_link: osm_link(ElementKind::Way, way.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn square(id: u64, tag_pairs: &[(&str, &str)]) -> RawWay {
        RawWay {
            id,
            nodes: vec![
                Some(Coordinate::new(51.000, -114.000)),
                Some(Coordinate::new(51.002, -114.000)),
                Some(Coordinate::new(51.002, -113.996)),
                Some(Coordinate::new(51.000, -113.996)),
            ],
            tags: tags(tag_pairs),
        }
    }

    #[test]
    fn test_point_amenity() {
        let node = RawNode {
            id: 42,
            lat: Some(51.001),
            lon: Some(-114.0),
            tags: tags(&[("amenity", "cafe"), ("name", "Bean There"), ("brand", "Beans")]),
        };

        let amenity = extract_point_amenity(&node, Coordinate::new(51.0, -114.0)).unwrap();

        assert_eq!(amenity.amenity_type, "amenity=cafe");
        assert_eq!(amenity.category, Category::Amenity);
        assert_eq!(amenity.name, "Bean There");
        assert_eq!(amenity.brand.as_deref(), Some("Beans"));
        assert!(amenity.opening_hours.is_none());
        // 0.001 degrees of latitude is about 111.2 m
        assert_eq!(amenity.distance_from_route_m, 111.2);
        assert_eq!(amenity.osm_link, "https://openstreetmap.org/node/42");
    }

    #[test]
    fn test_point_priority_and_fallbacks() {
        let node = RawNode {
            id: 1,
            lat: Some(0.0),
            lon: Some(0.0),
            tags: tags(&[("tourism", "viewpoint"), ("shop", "bakery")]),
        };
        let amenity = extract_point_amenity(&node, Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(amenity.amenity_type, "shop=bakery");
        assert_eq!(amenity.name, "Unnamed shop=bakery");

        let bare = RawNode { id: 2, lat: Some(0.0), lon: Some(0.0), tags: Tags::new() };
        let amenity = extract_point_amenity(&bare, Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(amenity.amenity_type, "unknown");
        assert_eq!(amenity.category, Category::Other);
    }

    #[test]
    fn test_point_without_position() {
        let node = RawNode { id: 3, lat: None, lon: Some(1.0), tags: tags(&[("amenity", "atm")]) };
        assert!(extract_point_amenity(&node, Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_area_priority_tourism_over_leisure() {
        let way = square(7, &[("tourism", "viewpoint"), ("leisure", "park")]);
        let amenity = extract_area_amenity(&way, Coordinate::new(51.001, -113.998)).unwrap();

        assert_eq!(amenity.category, Category::Tourism);
        assert_eq!(amenity.amenity_type, "tourism=viewpoint");

        let details = amenity.area.unwrap();
        assert_eq!(details.node_count, 4);
        assert_eq!(details.additional_info["tourism_type"], "viewpoint");
        assert!(!details.additional_info.contains_key("access"));
    }

    #[test]
    fn test_area_centroid_and_leisure_info() {
        let way = square(8, &[("leisure", "park"), ("name", "Edworthy Park")]);
        let center = Coordinate::new(51.001, -113.998);
        let amenity = extract_area_amenity(&way, center).unwrap();

        assert!((amenity.location.lat - 51.001).abs() < 1e-9);
        assert!((amenity.location.lon + 113.998).abs() < 1e-9);
        assert_eq!(amenity.distance_from_route_m, 0.0);
        assert_eq!(amenity.source, ElementKind::Way);

        let info = amenity.area.unwrap().additional_info;
        assert_eq!(info["access"], "public");
        assert_eq!(info["park_type"], "");
    }

    #[test]
    fn test_area_needs_two_resolved_nodes() {
        let way = RawWay {
            id: 9,
            nodes: vec![Some(Coordinate::new(0.0, 0.0)), None, None],
            tags: tags(&[("leisure", "park")]),
        };
        assert!(extract_area_amenity(&way, Coordinate::new(0.0, 0.0)).is_none());
        assert!(extract_way_segment(&way).is_none());
    }

    #[test]
    fn test_way_segment() {
        let way = RawWay {
            id: 11,
            nodes: vec![
                Some(Coordinate::new(0.0, 0.0)),
                None,
                Some(Coordinate::new(0.0, 0.001)),
                Some(Coordinate::new(0.0, 0.002)),
            ],
            tags: tags(&[("cycleway", "lane"), ("surface", "asphalt")]),
        };

        let segment = extract_way_segment(&way).unwrap();
        assert_eq!(segment.highway, "unknown");
        assert_eq!(segment.surface, "asphalt");
        assert_eq!(segment.maxspeed, "");
        assert_eq!(segment.node_count, 3);
        assert_eq!(segment.middle_node, Coordinate::new(0.0, 0.001));
    }
}
