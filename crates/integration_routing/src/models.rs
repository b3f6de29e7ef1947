//! Wire contract of the routing backend
//!
//! These types describe the canonical request and response shapes. Responses
//! from real deployments are not parsed into [`RouteResponse`] directly; they
//! go through [`normalize`](crate::normalize) so that partial or differently
//! named fields degrade gracefully.

use domain::RouteQuery;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/route`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Start location (free text)
    pub start: String,
    /// End location (free text)
    pub end: String,
    /// Vehicle height in metres
    pub vehicle_height_m: f64,
    /// Route around low bridges when possible
    #[serde(default = "default_avoid")]
    pub avoid_low_bridges: bool,
}

const fn default_avoid() -> bool {
    true
}

impl From<&RouteQuery> for RouteRequest {
    fn from(query: &RouteQuery) -> Self {
        Self {
            start: query.start().to_string(),
            end: query.end().to_string(),
            vehicle_height_m: query.vehicle_height_m(),
            avoid_low_bridges: query.avoid_low_bridges(),
        }
    }
}

/// Canonical success response of `POST /api/route`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Distance and duration
    pub summary: RouteSummary,
    /// Overall bridge risk
    pub bridge_risk: BridgeRisk,
    /// Warning messages
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Turn-by-turn instructions
    #[serde(default)]
    pub steps: Vec<String>,
    /// Main route
    pub geometry: LineStringGeometry,
    /// Alternative route avoiding low bridges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_geometry: Option<LineStringGeometry>,
    /// Bridge hazards near the route
    #[serde(default)]
    pub bridge_markers: Vec<WireBridgeMarker>,
}

/// Distance and duration of the main route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Kilometres
    pub distance_km: f64,
    /// Minutes
    pub duration_min: f64,
}

/// Overall bridge risk block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRisk {
    /// `low`, `medium` or `high`
    pub level: String,
    /// Explanation shown next to the risk badge
    pub status_text: String,
    /// Clearance of the nearest low bridge in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_bridge_height_m: Option<f64>,
    /// Distance of the nearest low bridge from the route in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_bridge_distance_m: Option<f64>,
}

/// GeoJSON `LineString` with `[lon, lat]` coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringGeometry {
    /// Always `LineString`
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

impl LineStringGeometry {
    /// Build a GeoJSON line string from `[lon, lat]` pairs
    #[must_use]
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates,
        }
    }
}

/// Bridge hazard as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBridgeMarker {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Clearance in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_m: Option<f64>,
    /// `low`, `medium` or `high`
    pub risk_level: String,
    /// Popup text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Either a message or a list of validation items
    pub detail: ErrorDetail,
}

/// `detail` is a plain string or a list of `{ msg }` items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Single human-readable message
    Message(String),
    /// Field validation failures
    Items(Vec<ErrorItem>),
}

/// One validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Human-readable message
    pub msg: String,
}

impl ErrorDetail {
    /// Flatten into a single banner message
    #[must_use]
    pub fn into_message(self) -> String {
        match self {
            Self::Message(msg) => msg,
            Self::Items(items) => items
                .into_iter()
                .map(|item| item.msg)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}
