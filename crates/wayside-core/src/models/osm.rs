//! Raw map elements as returned by the geographic data service

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::coordinate::Coordinate;

/// OpenStreetMap-style key/value tags
pub type Tags = BTreeMap<String, String>;

/// Element family; identifiers are only unique within one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deep link to an element on openstreetmap.org
pub fn osm_link(kind: ElementKind, id: u64) -> String {
    format!("https://openstreetmap.org/{}/{}", kind, id)
}

/// A point element; position may be missing in malformed responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
}

impl RawNode {
    pub fn location(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

/// A line or area element with its member positions resolved where possible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWay {
    pub id: u64,

    /// Member node positions; `None` where the service could not resolve one
    #[serde(default)]
    pub nodes: Vec<Option<Coordinate>>,

    #[serde(default)]
    pub tags: Tags,
}

impl RawWay {
    /// Member positions that resolved, in order
    pub fn resolved_nodes(&self) -> Vec<Coordinate> {
        self.nodes.iter().flatten().copied().collect()
    }
}

/// Decoded response of one area query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoResponse {
    pub nodes: Vec<RawNode>,
    pub ways: Vec<RawWay>,
}

impl GeoResponse {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }
}
