//! In-memory map data source for development and testing.
//!
//! Queries are answered by evaluating the query's selectors against a fixed
//! set of elements, so fixtures exercise the same query builders as the
//! Overpass adapter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{
    AreaQuery, Coordinate, ElementKind, GeoResponse, OutputMode, QueryKind, RawNode, RawWay,
};
use wayside_core::ports::GeoDataSource;

/// Fixed set of map elements answering area queries
#[derive(Debug, Clone, Default)]
pub struct StaticGeoSource {
    nodes: Vec<RawNode>,
    ways: Vec<RawWay>,
    failing_kinds: Vec<QueryKind>,
    failing_points: Vec<Coordinate>,
    calls: Arc<AtomicUsize>,
}

impl StaticGeoSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: RawNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_way(mut self, way: RawWay) -> Self {
        self.ways.push(way);
        self
    }

    /// Fail every query of the given kind
    pub fn failing_on(mut self, kind: QueryKind) -> Self {
        self.failing_kinds.push(kind);
        self
    }

    /// Fail every query whose box contains the point
    pub fn failing_near(mut self, point: Coordinate) -> Self {
        self.failing_points.push(point);
        self
    }

    /// Number of queries answered or failed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn way_in_box(way: &RawWay, query: &AreaQuery) -> bool {
        // Tag-only fixtures carry no geometry and match anywhere
        way.nodes.is_empty() || way.resolved_nodes().iter().any(|c| query.bbox.contains(c))
    }
}

#[async_trait]
impl GeoDataSource for StaticGeoSource {
    async fn query(&self, query: &AreaQuery) -> Result<GeoResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_kinds.contains(&query.kind)
            || self.failing_points.iter().any(|p| query.bbox.contains(p))
        {
            return Err(WaysideError::GeoQuery {
                reason: format!("static source configured to fail {:?} query", query.kind),
            });
        }

        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.location().is_some_and(|c| query.bbox.contains(&c)))
            .filter(|n| query.accepts(ElementKind::Node, &n.tags))
            .cloned()
            .collect();

        let ways = self
            .ways
            .iter()
            .filter(|w| Self::way_in_box(w, query))
            .filter(|w| query.accepts(ElementKind::Way, &w.tags))
            .map(|w| match query.output {
                OutputMode::Geometry => w.clone(),
                OutputMode::TagsOnly => RawWay { id: w.id, nodes: Vec::new(), tags: w.tags.clone() },
            })
            .collect();

        Ok(GeoResponse { nodes, ways })
    }

    fn name(&self) -> &str {
        "static"
    }
}
