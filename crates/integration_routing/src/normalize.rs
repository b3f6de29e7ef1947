//! Response normalization
//!
//! Routing backends in the field disagree on field names and nesting. Each
//! canonical field therefore has an ordered list of candidate paths (dotted
//! JSON paths) and [`first_of`] walks them, returning the first value the
//! field's extractor accepts. Anything that cannot be extracted degrades to
//! the field's default, so [`normalize`] never fails.

use domain::{BridgeMarker, LineString, NearestBridge, Position, RiskLevel, RouteResult};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RoutingError;

/// Ordered candidate paths for one canonical field
pub type Candidates = &'static [&'static str];

/// Candidate path table, in preference order
pub mod paths {
    use super::Candidates;

    /// Route length in kilometres
    pub const DISTANCE_KM: Candidates = &[
        "distance_km",
        "summary.distance_km",
        "summary.distance",
        "metrics.distance_km",
    ];

    /// Travel time in minutes
    pub const DURATION_MIN: Candidates = &[
        "duration_min",
        "summary.duration_min",
        "summary.duration",
        "metrics.duration_min",
    ];

    /// Overall risk level
    pub const RISK_LEVEL: Candidates = &[
        "bridge_risk.level",
        "risk_level",
        "bridge_result.risk_level",
    ];

    /// Risk explanation
    pub const RISK_STATUS_TEXT: Candidates = &[
        "bridge_risk.status_text",
        "status_text",
        "bridge_result.status_text",
    ];

    /// Warning messages
    pub const WARNINGS: Candidates = &["warnings", "bridge_warnings"];

    /// Turn-by-turn instructions
    pub const STEPS: Candidates = &["steps", "route_steps", "turn_by_turn"];

    /// Main route geometry
    pub const MAIN_GEOMETRY: Candidates = &[
        "geometry",
        "main_geometry",
        "main_route.geometry",
        "main_geojson",
        "main_route.coords",
    ];

    /// Alternative route geometry
    pub const ALT_GEOMETRY: Candidates = &[
        "alt_geometry",
        "alt_route.geometry",
        "alt_geojson",
        "alt_route.coords",
    ];

    /// Bridge hazards
    pub const BRIDGES: Candidates = &["bridge_markers", "bridges", "bridge_warnings", "hazards"];

    /// Nearest bridge as `(height, distance)` path pairs
    pub const NEAREST_BRIDGE: &[(&str, &str)] = &[
        (
            "bridge_risk.nearest_bridge_height_m",
            "bridge_risk.nearest_bridge_distance_m",
        ),
        (
            "bridge_result.nearest_bridge.height_m",
            "bridge_result.nearest_bridge.distance_m",
        ),
        ("nearest_bridge.height_m", "nearest_bridge.distance_m"),
    ];
}

/// Keys that carry the text of a warning or step object
const TEXT_KEYS: &[&str] = &["message", "text", "msg", "instruction", "description"];
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LON_KEYS: &[&str] = &["lon", "lng", "longitude"];
const HEIGHT_KEYS: &[&str] = &["height_m", "height"];
const MARKER_RISK_KEYS: &[&str] = &["risk_level", "level", "risk"];
const MARKER_MESSAGE_KEYS: &[&str] = &["message", "msg", "text"];

/// Normalize any backend JSON value into a [`RouteResult`]
///
/// Total: every input, including `{}`, `null` and arrays, yields a result.
#[must_use]
pub fn normalize(raw: &Value) -> RouteResult {
    let nearest_bridge = paths::NEAREST_BRIDGE.iter().find_map(|(height, distance)| {
        Some(NearestBridge {
            height_m: lookup(raw, height).and_then(as_number)?,
            distance_m: lookup(raw, distance).and_then(as_number)?,
        })
    });

    let result = RouteResult {
        distance_km: first_of(raw, paths::DISTANCE_KM, as_number),
        duration_min: first_of(raw, paths::DURATION_MIN, as_number),
        risk_level: first_of(raw, paths::RISK_LEVEL, as_risk).unwrap_or_default(),
        risk_status_text: first_of(raw, paths::RISK_STATUS_TEXT, as_text),
        nearest_bridge,
        warnings: first_of(raw, paths::WARNINGS, as_text_list).unwrap_or_default(),
        steps: first_of(raw, paths::STEPS, as_text_list).unwrap_or_default(),
        main_geometry: first_of(raw, paths::MAIN_GEOMETRY, as_line_string),
        alt_geometry: first_of(raw, paths::ALT_GEOMETRY, as_line_string),
        bridge_markers: first_of(raw, paths::BRIDGES, as_markers).unwrap_or_default(),
    };

    debug!(
        distance_km = ?result.distance_km,
        risk = %result.risk_level,
        warnings = result.warnings.len(),
        markers = result.bridge_markers.len(),
        has_geometry = result.main_geometry.is_some(),
        "Normalized route response"
    );

    result
}

/// Parse a response body and normalize it
///
/// # Errors
///
/// Returns [`RoutingError::ParseError`] if the body is not valid JSON.
pub fn parse_route_body(body: &str) -> Result<RouteResult, RoutingError> {
    let raw: Value =
        serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;
    Ok(normalize(&raw))
}

/// Resolve a dotted path, treating `null` as absent
fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(raw, |node, key| node.get(key))
        .filter(|value| !value.is_null())
}

/// First candidate whose value the extractor accepts
fn first_of<'a, T>(
    raw: &'a Value,
    candidates: Candidates,
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|path| lookup(raw, path))
        .find_map(extract)
}

/// First key of an object whose value the extractor accepts
fn first_key<'a, T>(
    object: &'a Value,
    keys: &[&str],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| object.get(key))
        .find_map(extract)
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn as_text(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn as_risk(value: &Value) -> Option<RiskLevel> {
    let level = RiskLevel::parse_lenient(value.as_str()?);
    level.is_known().then_some(level)
}

/// A warning or step item: a string, or an object with a text field
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => as_text(value),
        Value::Object(_) => first_key(value, TEXT_KEYS, as_text),
        _ => None,
    }
}

/// A list of texts; a bare string counts as a one-item list
///
/// An empty array is an explicit "nothing to report" and is accepted. A
/// non-empty array without a single text item holds some other shape and
/// is rejected so a later candidate can supply the list.
fn as_text_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => present_list(items, item_text),
        Value::String(_) => as_text(value).map(|text| vec![text]),
        _ => None,
    }
}

/// Items of a present array, or `None` when none of its items fit
fn present_list<T>(items: &[Value], extract: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    let extracted: Vec<T> = items.iter().filter_map(extract).collect();
    (items.is_empty() || !extracted.is_empty()).then_some(extracted)
}

/// Geometry in any of the accepted shapes
///
/// Accepts a GeoJSON `LineString`, a `Feature` or `FeatureCollection`
/// wrapping one, a `{ coords: [...] }` object or a bare coordinate array.
/// A coordinate list with any malformed entry is rejected as a whole.
fn as_line_string(value: &Value) -> Option<LineString> {
    match value {
        Value::Array(items) => coordinates(items),
        Value::Object(object) => match object.get("type").and_then(Value::as_str) {
            Some("Feature") => object.get("geometry").and_then(as_line_string),
            Some("FeatureCollection") => object
                .get("features")
                .and_then(Value::as_array)
                .and_then(|features| features.iter().find_map(as_line_string)),
            Some("LineString") | None => object
                .get("coordinates")
                .or_else(|| object.get("coords"))
                .and_then(Value::as_array)
                .and_then(|items| coordinates(items)),
            Some(other) => {
                debug!(geometry_type = other, "Ignoring unsupported geometry type");
                None
            },
        },
        _ => None,
    }
}

fn coordinates(items: &[Value]) -> Option<LineString> {
    let positions: Option<Vec<Position>> = items
        .iter()
        .map(|item| {
            let pair = item.as_array()?;
            let lon = pair.first().and_then(as_number)?;
            let lat = pair.get(1).and_then(as_number)?;
            Some(Position::new(lon, lat))
        })
        .collect();

    if positions.is_none() {
        warn!(points = items.len(), "Discarding geometry with malformed coordinates");
    }
    positions.map(LineString::new)
}

fn as_marker(value: &Value) -> Option<BridgeMarker> {
    if !value.is_object() {
        return None;
    }

    let lat = first_key(value, LAT_KEYS, as_number)?;
    let lon = first_key(value, LON_KEYS, as_number)?;

    Some(BridgeMarker {
        lat,
        lon,
        height_m: first_key(value, HEIGHT_KEYS, as_number),
        risk_level: first_key(value, MARKER_RISK_KEYS, |v| {
            v.as_str().map(RiskLevel::parse_lenient)
        })
        .unwrap_or_default(),
        message: first_key(value, MARKER_MESSAGE_KEYS, as_text),
    })
}

/// A list of markers; items without coordinates are skipped
fn as_markers(value: &Value) -> Option<Vec<BridgeMarker>> {
    present_list(value.as_array()?, as_marker)
}
