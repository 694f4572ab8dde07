//! Backend-neutral description of an area query
//!
//! Discovery builds [`AreaQuery`] values; the geographic data adapter decides
//! how to render them (Overpass QL for the HTTP client, direct tag matching
//! for the in-memory source).

use serde::{Deserialize, Serialize};

use super::coordinate::BoundingBox;
use super::osm::{ElementKind, Tags};

/// What the query is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Amenities,
    Paths,
    Highways,
}

/// How much of each element the service should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Tags plus full geometry
    #[default]
    Geometry,
    /// Tags only
    TagsOnly,
}

/// One tag predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagCondition {
    Exists(String),
    Equals(String, String),
    OneOf(String, Vec<String>),
}

impl TagCondition {
    pub fn exists(key: &str) -> Self {
        Self::Exists(key.to_string())
    }

    pub fn equals(key: &str, value: &str) -> Self {
        Self::Equals(key.to_string(), value.to_string())
    }

    pub fn one_of(key: &str, values: &[&str]) -> Self {
        Self::OneOf(key.to_string(), values.iter().map(|v| v.to_string()).collect())
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Exists(key) | Self::Equals(key, _) | Self::OneOf(key, _) => key,
        }
    }

    pub fn matches(&self, tags: &Tags) -> bool {
        match self {
            Self::Exists(key) => tags.contains_key(key),
            Self::Equals(key, value) => tags.get(key) == Some(value),
            Self::OneOf(key, values) => tags.get(key).is_some_and(|v| values.contains(v)),
        }
    }
}

/// Element family plus a conjunction of tag conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub element: ElementKind,
    pub conditions: Vec<TagCondition>,
}

impl Selector {
    pub fn node(conditions: Vec<TagCondition>) -> Self {
        Self { element: ElementKind::Node, conditions }
    }

    pub fn way(conditions: Vec<TagCondition>) -> Self {
        Self { element: ElementKind::Way, conditions }
    }

    pub fn matches(&self, element: ElementKind, tags: &Tags) -> bool {
        self.element == element && self.conditions.iter().all(|c| c.matches(tags))
    }
}

/// A union of selectors evaluated inside one bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaQuery {
    pub kind: QueryKind,
    pub bbox: BoundingBox,
    pub selectors: Vec<Selector>,
    #[serde(default)]
    pub output: OutputMode,
}

impl AreaQuery {
    /// True when any selector accepts the element
    pub fn accepts(&self, element: ElementKind, tags: &Tags) -> bool {
        self.selectors.iter().any(|s| s.matches(element, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_condition_matching() {
        let t = tags(&[("highway", "path"), ("bicycle", "designated")]);

        assert!(TagCondition::exists("highway").matches(&t));
        assert!(!TagCondition::exists("cycleway").matches(&t));
        assert!(TagCondition::equals("highway", "path").matches(&t));
        assert!(!TagCondition::equals("highway", "cycleway").matches(&t));
        assert!(TagCondition::one_of("bicycle", &["yes", "designated"]).matches(&t));
        assert!(!TagCondition::one_of("bicycle", &["no"]).matches(&t));
    }

    #[test]
    fn test_selector_requires_all_conditions_and_element() {
        let selector = Selector::way(vec![
            TagCondition::equals("highway", "residential"),
            TagCondition::exists("traffic_calming"),
        ]);

        let calmed = tags(&[("highway", "residential"), ("traffic_calming", "bump")]);
        let plain = tags(&[("highway", "residential")]);

        assert!(selector.matches(ElementKind::Way, &calmed));
        assert!(!selector.matches(ElementKind::Way, &plain));
        assert!(!selector.matches(ElementKind::Node, &calmed));
    }
}
