//! Canonical route result
//!
//! The backend response shape is not fixed across deployments, so every
//! field here is optional or defaults to empty. The renderer consumes this
//! model only.

use serde::{Deserialize, Serialize};

use crate::value_objects::{LineString, Position, RiskLevel};

/// The closest low bridge along the route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestBridge {
    /// Clearance height in metres
    pub height_m: f64,
    /// Distance from the route in metres
    pub distance_m: f64,
}

/// A point hazard shown on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMarker {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Clearance height in metres, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_m: Option<f64>,
    /// Risk of this particular bridge
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Free-text note from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BridgeMarker {
    /// Create a marker at a coordinate with unknown risk
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            height_m: None,
            risk_level: RiskLevel::Unknown,
            message: None,
        }
    }

    /// Set the clearance height
    #[must_use]
    pub fn with_height(mut self, height_m: f64) -> Self {
        self.height_m = Some(height_m);
        self
    }

    /// Set the risk level
    #[must_use]
    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// Set the popup message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The marker as a map position
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.lon, self.lat)
    }
}

/// Backend-shape-independent route model consumed by rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Route length in kilometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Travel time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    /// Overall low-bridge risk
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Backend explanation of the risk level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_status_text: Option<String>,
    /// Closest low bridge, if the backend reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_bridge: Option<NearestBridge>,
    /// Warning messages
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Turn-by-turn instructions
    #[serde(default)]
    pub steps: Vec<String>,
    /// Main route polyline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_geometry: Option<LineString>,
    /// Alternative route polyline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_geometry: Option<LineString>,
    /// Bridge hazards
    #[serde(default)]
    pub bridge_markers: Vec<BridgeMarker>,
}

impl RouteResult {
    /// Whether there is any geometry or marker to put on the map
    #[must_use]
    pub fn has_map_content(&self) -> bool {
        self.main_geometry.as_ref().is_some_and(|g| !g.is_empty())
            || self.alt_geometry.as_ref().is_some_and(|g| !g.is_empty())
            || !self.bridge_markers.is_empty()
    }

    /// Number of markers at high risk
    #[must_use]
    pub fn high_risk_markers(&self) -> usize {
        self.bridge_markers
            .iter()
            .filter(|m| m.risk_level == RiskLevel::High)
            .count()
    }
}
