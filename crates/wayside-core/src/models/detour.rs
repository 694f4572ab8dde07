//! Normalized points of interest, path segments, and detour opportunities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::coordinate::Coordinate;
use super::osm::ElementKind;

/// Tag family an amenity was classified under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Amenity,
    Shop,
    Tourism,
    Leisure,
    Natural,
    Historic,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Amenity => "amenity",
            Category::Shop => "shop",
            Category::Tourism => "tourism",
            Category::Leisure => "leisure",
            Category::Natural => "natural",
            Category::Historic => "historic",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra attributes only present on amenities extracted from areas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaDetails {
    pub node_count: usize,
    pub website: Option<String>,
    pub phone: Option<String>,

    /// Category-specific attributes, e.g. `park_type` for leisure areas
    #[serde(default)]
    pub additional_info: BTreeMap<String, String>,
}

/// A point of interest near a sample point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: u64,
    pub source: ElementKind,
    pub name: String,

    /// Matched tag as `key=value`, or `unknown`
    #[serde(rename = "type")]
    pub amenity_type: String,

    pub category: Category,
    pub brand: Option<String>,
    pub opening_hours: Option<String>,
    pub location: Coordinate,

    /// Haversine distance from the querying sample point, rounded to 0.1 m
    pub distance_from_route_m: f64,

    pub osm_link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaDetails>,
}

impl Amenity {
    /// True when the source data carried no `name` tag
    pub fn is_unnamed(&self) -> bool {
        self.name.starts_with("Unnamed")
    }
}

/// A path or street segment that could serve as an alternative way through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaySegment {
    pub id: u64,
    pub highway: String,
    pub name: String,
    pub maxspeed: String,
    pub surface: String,
    pub bicycle: String,
    pub foot: String,

    /// Member node at index `n / 2` of the resolved nodes
    pub middle_node: Coordinate,

    pub node_count: usize,
    pub osm_link: String,
}

/// Discriminant of [`DetourOpportunity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetourKind {
    Amenity,
    Way,
}

impl DetourKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetourKind::Amenity => "amenity",
            DetourKind::Way => "way",
        }
    }
}

/// Something worth leaving the route for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DetourOpportunity {
    Amenity {
        amenity: Amenity,
        detour_distance_m: f64,
        description: String,
    },
    Way {
        way: WaySegment,
        detour_distance_m: f64,
        description: String,
    },
}

impl DetourOpportunity {
    /// Package an amenity; its detour distance is its distance from the route
    pub fn for_amenity(amenity: Amenity) -> Self {
        let detour_distance_m = amenity.distance_from_route_m;
        let description = format!(
            "{} ({}) - {:.0}m from route",
            amenity.name, amenity.amenity_type, detour_distance_m
        );
        Self::Amenity {
            amenity,
            detour_distance_m,
            description,
        }
    }

    /// Package a way segment with a freshly computed distance to its middle node
    pub fn for_way(way: WaySegment, detour_distance_m: f64) -> Self {
        let description = format!("Way {} - {:.0}m from route", way.id, detour_distance_m);
        Self::Way {
            way,
            detour_distance_m,
            description,
        }
    }

    pub fn kind(&self) -> DetourKind {
        match self {
            Self::Amenity { .. } => DetourKind::Amenity,
            Self::Way { .. } => DetourKind::Way,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Amenity { amenity, .. } => amenity.id,
            Self::Way { way, .. } => way.id,
        }
    }

    /// Global deduplication key, `"{kind}_{id}"`
    ///
    /// OSM ids are scoped per element type, so amenity keys carry their
    /// source element as well: `amenity_node_12`, `amenity_way_12`, `way_99`.
    pub fn dedup_key(&self) -> String {
        let kind = self.kind().as_str();
        match self {
            Self::Amenity { amenity, .. } => format!("{}_{}_{}", kind, amenity.source, amenity.id),
            Self::Way { way, .. } => format!("{}_{}", kind, way.id),
        }
    }

    pub fn detour_distance_m(&self) -> f64 {
        match self {
            Self::Amenity { detour_distance_m, .. } | Self::Way { detour_distance_m, .. } => {
                *detour_distance_m
            }
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Amenity { description, .. } | Self::Way { description, .. } => description,
        }
    }

    pub fn as_amenity(&self) -> Option<&Amenity> {
        match self {
            Self::Amenity { amenity, .. } => Some(amenity),
            Self::Way { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::osm::osm_link;

    fn cafe() -> Amenity {
        Amenity {
            id: 12,
            source: ElementKind::Node,
            name: "Bean There".to_string(),
            amenity_type: "amenity=cafe".to_string(),
            category: Category::Amenity,
            brand: None,
            opening_hours: Some("Mo-Su 07:00-17:00".to_string()),
            location: Coordinate::new(51.0, -114.0),
            distance_from_route_m: 84.4,
            osm_link: osm_link(ElementKind::Node, 12),
            area: None,
        }
    }

    fn footpath() -> WaySegment {
        WaySegment {
            id: 99,
            highway: "footway".to_string(),
            name: String::new(),
            maxspeed: String::new(),
            surface: "gravel".to_string(),
            bicycle: "yes".to_string(),
            foot: String::new(),
            middle_node: Coordinate::new(51.001, -114.0),
            node_count: 4,
            osm_link: osm_link(ElementKind::Way, 99),
        }
    }

    #[test]
    fn test_amenity_description() {
        let detour = DetourOpportunity::for_amenity(cafe());
        assert_eq!(detour.description(), "Bean There (amenity=cafe) - 84m from route");
        assert_eq!(detour.detour_distance_m(), 84.4);
        assert_eq!(detour.dedup_key(), "amenity_node_12");
    }

    #[test]
    fn test_node_and_area_with_same_id_stay_distinct() {
        let node = DetourOpportunity::for_amenity(cafe());
        let area = DetourOpportunity::for_amenity(Amenity {
            source: ElementKind::Way,
            ..cafe()
        });

        assert_eq!(area.dedup_key(), "amenity_way_12");
        assert_ne!(node.dedup_key(), area.dedup_key());
    }

    #[test]
    fn test_way_description() {
        let detour = DetourOpportunity::for_way(footpath(), 111.6);
        assert_eq!(detour.description(), "Way 99 - 112m from route");
        assert_eq!(detour.dedup_key(), "way_99");
        assert_eq!(detour.kind(), DetourKind::Way);
    }

    #[test]
    fn test_tagged_serialization() {
        let value = serde_json::to_value(DetourOpportunity::for_amenity(cafe())).unwrap();
        assert_eq!(value["type"], "amenity");
        assert_eq!(value["amenity"]["type"], "amenity=cafe");
        assert_eq!(value["amenity"]["category"], "amenity");
        assert!(value["amenity"].get("area").is_none());

        let back: DetourOpportunity = serde_json::from_value(value).unwrap();
        assert_eq!(back.id(), 12);
    }

    #[test]
    fn test_unnamed_detection() {
        let mut amenity = cafe();
        assert!(!amenity.is_unnamed());
        amenity.name = "Unnamed amenity=bench".to_string();
        assert!(amenity.is_unnamed());
    }
}
