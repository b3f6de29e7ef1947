//! Map widget port
//!
//! The renderer draws through these primitives only; tiles, projection and
//! styling belong to whatever widget implements the port.

use std::fmt;

use domain::{Bounds, LineString, Position};
use serde::{Deserialize, Serialize};

/// Overlay layers owned by the route renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Main route polyline
    MainRoute,
    /// Alternative route polyline
    AltRoute,
    /// Bridge hazard markers
    BridgeMarkers,
}

impl LayerKind {
    /// Every layer, in drawing order
    pub const ALL: [Self; 3] = [Self::MainRoute, Self::AltRoute, Self::BridgeMarkers];

    /// Stable layer identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainRoute => "main_route",
            Self::AltRoute => "alt_route",
            Self::BridgeMarkers => "bridge_markers",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke style for a polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Continuous stroke
    Solid,
    /// Dashed stroke
    Dashed,
}

/// Port for the map widget
pub trait MapPort: Send {
    /// Remove everything drawn on a layer
    fn clear_layer(&mut self, layer: LayerKind);

    /// Draw a polyline on a layer
    fn draw_polyline(&mut self, layer: LayerKind, line: &LineString, style: LineStyle);

    /// Draw a point marker with a fill color (`#rrggbb`) and popup text
    fn draw_marker(&mut self, layer: LayerKind, position: Position, color: &str, popup: &str);

    /// Move the viewport to show the given bounds
    fn fit_bounds(&mut self, bounds: Bounds);
}
