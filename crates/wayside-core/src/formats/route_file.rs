//! GeoJSON route files

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::error::{Result, WaysideError};
use crate::models::{Coordinate, DetourRoute, PlannedRoute, Route, RouteWaypoint};
use crate::units::{round_to, METERS_PER_KM, SECONDS_PER_MINUTE};

/// Load a route from a GeoJSON file
///
/// Accepts a `Feature` or the first feature of a `FeatureCollection`, with
/// LineString geometry.
pub fn load_route(path: &Path) -> Result<Route> {
    let content = fs::read_to_string(path)
        .map_err(|e| WaysideError::route_load(path, format!("Failed to read file: {}", e)))?;

    parse_route(&content, path)
}

/// Parse route GeoJSON already read into memory; `origin` is used in errors
pub fn parse_route(content: &str, origin: &Path) -> Result<Route> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e| WaysideError::route_load(origin, format!("Invalid GeoJSON: {}", e)))?;

    let feature = match geojson {
        GeoJson::Feature(feature) => feature,
        GeoJson::FeatureCollection(collection) => {
            collection.features.into_iter().next().ok_or_else(|| {
                WaysideError::route_load(origin, "FeatureCollection has no features")
            })?
        }
        GeoJson::Geometry(_) => {
            return Err(WaysideError::route_load(
                origin,
                "Invalid GeoJSON format: expected Feature or FeatureCollection",
            ))
        }
    };

    let geometry = feature
        .geometry
        .ok_or_else(|| WaysideError::route_load(origin, "Feature has no geometry"))?;

    let positions = match geometry.value {
        Value::LineString(positions) => positions,
        other => {
            return Err(WaysideError::route_load(
                origin,
                format!("Expected LineString geometry, found {}", geometry_type(&other)),
            ))
        }
    };

    let mut coordinates = Vec::with_capacity(positions.len());
    for (idx, position) in positions.iter().enumerate() {
        if position.len() < 2 {
            return Err(WaysideError::route_load(
                origin,
                format!("Position {} has fewer than two values", idx),
            ));
        }
        coordinates.push(Coordinate::from_lon_lat([position[0], position[1]]));
    }

    if coordinates.is_empty() {
        return Err(WaysideError::route_load(origin, "Route has no coordinates"));
    }

    Ok(Route::from_coordinates(coordinates))
}

fn geometry_type(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn line_string(coordinates: &[Coordinate]) -> Result<Geometry> {
    if coordinates.len() < 2 {
        return Err(WaysideError::InvalidRoute {
            reason: format!("a route needs at least 2 coordinates, got {}", coordinates.len()),
        });
    }

    let positions = coordinates.iter().map(|c| c.to_lon_lat().to_vec()).collect();
    Ok(Geometry::new(Value::LineString(positions)))
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn waypoint_json(waypoint: &RouteWaypoint, fallback_name: &str) -> serde_json::Value {
    let name = if waypoint.name.is_empty() {
        fallback_name
    } else {
        waypoint.name.as_str()
    };

    json!({
        "location": waypoint.location.to_lon_lat(),
        "name": name,
        "distance_to_road": round_to(waypoint.snap_distance_m, 2),
    })
}

/// Route feature with the raw `distance` (m) and `duration` (s) properties
pub fn route_feature(planned: &PlannedRoute) -> Result<Feature> {
    let geometry = line_string(&planned.route.coordinates)?;

    let mut properties = JsonObject::new();
    properties.insert("distance".into(), json!(planned.route.distance_m.unwrap_or(0.0)));
    properties.insert("duration".into(), json!(planned.route.duration_s.unwrap_or(0.0)));

    Ok(feature(geometry, properties))
}

/// Route feature with rounded summary properties and snapped endpoints
pub fn extended_route_feature(planned: &PlannedRoute) -> Result<Feature> {
    let geometry = line_string(&planned.route.coordinates)?;

    let distance_km = planned.route.distance_m.unwrap_or(0.0) / METERS_PER_KM;
    let duration_minutes = planned.route.duration_s.unwrap_or(0.0) / SECONDS_PER_MINUTE;

    let mut properties = JsonObject::new();
    properties.insert("distance_km".into(), json!(round_to(distance_km, 2)));
    properties.insert("duration_minutes".into(), json!(round_to(duration_minutes, 1)));
    properties.insert("weight".into(), json!(planned.weight.unwrap_or(0.0)));
    properties.insert(
        "weight_name".into(),
        json!(planned.weight_name.as_deref().unwrap_or("unknown")),
    );

    if let (Some(start), Some(end)) = (planned.start_waypoint(), planned.end_waypoint()) {
        properties.insert(
            "waypoints".into(),
            json!({
                "start": waypoint_json(start, "Start"),
                "end": waypoint_json(end, "End"),
            }),
        );
    }

    Ok(feature(geometry, properties))
}

/// Feature for a combined start -> detour -> end route
pub fn detour_route_feature(detour: &DetourRoute) -> Result<Feature> {
    let geometry = line_string(&detour.route.coordinates)?;

    let mut properties = JsonObject::new();
    properties.insert("distance_km".into(), json!(detour.distance_km()));
    properties.insert("duration_minutes".into(), json!(detour.duration_minutes()));
    properties.insert(
        "waypoints".into(),
        json!({
            "start": waypoint_json(&detour.start, "Start"),
            "detour": waypoint_json(&detour.detour, "Detour"),
            "end": waypoint_json(&detour.end, "End"),
        }),
    );

    Ok(feature(geometry, properties))
}

/// Collect several routes into one FeatureCollection
///
/// Names default to `Route N` (1-based). Routes that cannot be converted are
/// skipped with a warning.
pub fn route_collection(routes: &[PlannedRoute], names: &[String]) -> FeatureCollection {
    let mut features = Vec::with_capacity(routes.len());

    for (idx, planned) in routes.iter().enumerate() {
        let mut feature = match extended_route_feature(planned) {
            Ok(feature) => feature,
            Err(e) => {
                tracing::warn!(route = idx + 1, error = %e, "Could not convert route");
                continue;
            }
        };

        let name = names.get(idx).cloned().unwrap_or_else(|| format!("Route {}", idx + 1));
        feature.set_property("route_name", name);
        feature.set_property("route_id", idx);
        features.push(feature);
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write any GeoJSON value as pretty-printed JSON
pub fn save_geojson<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "Wrote GeoJSON file");
    Ok(())
}
