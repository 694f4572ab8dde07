use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use wayside_core::config::LayeredConfig;
use wayside_core::error::{Result, WaysideError};
use wayside_core::models::{
    AreaQuery, Coordinate, GeoResponse, OutputMode, QueryKind, RawNode, RawWay,
    TagCondition, Tags,
};
use wayside_core::ports::GeoDataSource;

/// Overpass API adapter
pub struct OverpassClient {
    /// Interpreter endpoint (e.g., "https://overpass-api.de/api/interpreter")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OverpassClient {
    /// Create a client with reqwest's default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client with an overall request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            WaysideError::ConfigInvalid {
                key: "request_timeout_secs".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        match config.request_timeout_secs.value {
            Some(secs) => Self::with_timeout(&config.overpass_url.value, Duration::from_secs(secs)),
            None => Ok(Self::new(&config.overpass_url.value)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GeoDataSource for OverpassClient {
    async fn query(&self, query: &AreaQuery) -> Result<GeoResponse> {
        let body = render_query(query);
        tracing::debug!(kind = ?query.kind, selectors = query.selectors.len(), "Sending Overpass query");

        let response = self
            .client
            .post(&self.base_url)
            .body(body)
            .send()
            .await
            .map_err(|e| WaysideError::GeoQuery {
                reason: format!("Failed to reach Overpass at {}: {}", self.base_url, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WaysideError::GeoQuery {
                reason: format!("Overpass API error ({}): {}", status, error_text.trim()),
            });
        }

        let text = response.text().await.map_err(|e| WaysideError::GeoQuery {
            reason: format!("Failed to read Overpass response: {}", e),
        })?;

        let decoded = decode_response(&text)?;
        tracing::debug!(
            nodes = decoded.nodes.len(),
            ways = decoded.ways.len(),
            "Overpass query returned"
        );
        Ok(decoded)
    }

    fn name(&self) -> &str {
        "overpass"
    }
}

/// Server-side timeout for a query, in seconds
fn server_timeout(kind: QueryKind) -> u32 {
    match kind {
        QueryKind::Highways => 10,
        QueryKind::Amenities | QueryKind::Paths => 25,
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn render_condition(condition: &TagCondition) -> String {
    match condition {
        TagCondition::Exists(key) => format!("[\"{}\"]", escape(key)),
        TagCondition::Equals(key, value) => format!("[\"{}\"=\"{}\"]", escape(key), escape(value)),
        TagCondition::OneOf(key, values) => {
            let alternatives: Vec<String> = values.iter().map(|v| escape(v)).collect();
            format!("[\"{}\"~\"^({})$\"]", escape(key), alternatives.join("|"))
        }
    }
}

/// Render an area query as Overpass QL
pub fn render_query(query: &AreaQuery) -> String {
    let bbox = format!(
        "({},{},{},{})",
        query.bbox.south, query.bbox.west, query.bbox.north, query.bbox.east
    );

    let mut ql = format!("[out:json][timeout:{}];\n(\n", server_timeout(query.kind));

    for selector in &query.selectors {
        let conditions: String = selector.conditions.iter().map(render_condition).collect();
        ql.push_str(&format!("  {}{}{};\n", selector.element, conditions, bbox));
    }

    ql.push_str(");\n");
    ql.push_str(match query.output {
        OutputMode::Geometry => "out geom;\n",
        OutputMode::TagsOnly => "out tags;\n",
    });

    ql
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: u64,
        lat: Option<f64>,
        lon: Option<f64>,
        #[serde(default)]
        tags: Tags,
    },
    Way {
        id: u64,
        #[serde(default)]
        geometry: Vec<Option<OverpassPoint>>,
        #[serde(default)]
        tags: Tags,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct OverpassPoint {
    lat: f64,
    lon: f64,
}

/// Decode an Overpass JSON response into raw nodes and ways
///
/// Way geometry entries may be `null` for members outside the query area;
/// they are kept as unresolved nodes. Relations are ignored.
pub fn decode_response(body: &str) -> Result<GeoResponse> {
    let parsed: OverpassResponse = serde_json::from_str(body).map_err(|e| {
        WaysideError::GeoQuery {
            reason: format!("Failed to parse Overpass response: {}", e),
        }
    })?;

    let mut response = GeoResponse::default();
    for element in parsed.elements {
        match element {
            OverpassElement::Node { id, lat, lon, tags } => {
                response.nodes.push(RawNode { id, lat, lon, tags });
            }
            OverpassElement::Way { id, geometry, tags } => {
                let nodes = geometry
                    .into_iter()
                    .map(|p| p.map(|p| Coordinate::new(p.lat, p.lon)))
                    .collect();
                response.ways.push(RawWay { id, nodes, tags });
            }
            OverpassElement::Other => {}
        }
    }

    Ok(response)
}
