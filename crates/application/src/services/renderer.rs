//! Route result renderer
//!
//! Turns a [`RouteResult`] into the three views of the planner: the summary
//! panel, the warnings and steps lists and the map overlay. Rendering is a
//! pure function of the result; the map is fully redrawn every time, so
//! rendering the same result twice leaves the same state behind.

use domain::{BridgeMarker, Bounds, LineString, RiskLevel, RouteResult};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::ports::{LayerKind, LineStyle, MapPort};

/// Placeholder shown for absent summary values
pub const PLACEHOLDER: &str = "--";

const NO_WARNINGS: &str = "No bridge warnings for this route";
const NO_STEPS: &str = "No directions available";

/// Severity class of the risk badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low risk
    Ok,
    /// Medium risk
    Warn,
    /// High risk
    Danger,
    /// No risk information
    None,
}

impl Severity {
    /// CSS-style class name
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Danger => "danger",
            Self::None => "none",
        }
    }
}

impl From<RiskLevel> for Severity {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::Ok,
            RiskLevel::Medium => Self::Warn,
            RiskLevel::High => Self::Danger,
            RiskLevel::Unknown => Self::None,
        }
    }
}

/// Badge label for a risk level
#[must_use]
pub const fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low risk",
        RiskLevel::Medium => "Medium risk",
        RiskLevel::High => "High risk",
        RiskLevel::Unknown => "No data",
    }
}

/// Marker fill color for a risk level
#[must_use]
pub const fn marker_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "#2e7d32",
        RiskLevel::Medium => "#f9a825",
        RiskLevel::High => "#c62828",
        RiskLevel::Unknown => "#757575",
    }
}

/// Summary panel contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    /// Route length, e.g. `"27.3 km"`
    pub distance: String,
    /// Travel time, e.g. `"42 min"`
    pub duration: String,
    /// Risk badge class
    pub severity: Severity,
    /// Risk badge label
    pub risk_label: String,
    /// Risk explanation from the backend
    pub status_text: Option<String>,
    /// Nearest bridge line, e.g. `"Nearest bridge: 4.1 m, 120 m away"`
    pub nearest_bridge: Option<String>,
}

/// A list view with an optional placeholder item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// Items to display; a single placeholder item when there is no data
    pub items: Vec<String>,
    /// Whether `items` holds the placeholder rather than data
    pub placeholder: bool,
}

impl ListView {
    fn from_items(items: &[String], placeholder: &str) -> Self {
        if items.is_empty() {
            Self {
                items: vec![placeholder.to_string()],
                placeholder: true,
            }
        } else {
            Self {
                items: items.to_vec(),
                placeholder: false,
            }
        }
    }

    /// Whether the list holds real items
    #[must_use]
    pub const fn has_data(&self) -> bool {
        !self.placeholder
    }
}

/// A map element that could not be drawn
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum RenderError {
    /// A polyline contains an unusable coordinate
    #[error("Skipped {layer} geometry: {reason}")]
    InvalidGeometry {
        /// Affected layer
        layer: LayerKind,
        /// What was wrong
        reason: String,
    },

    /// A bridge marker has an unusable position
    #[error("Skipped bridge marker #{index}: {reason}")]
    InvalidMarker {
        /// Index in the result's marker list
        index: usize,
        /// What was wrong
        reason: String,
    },
}

/// What was drawn on the map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    /// Polylines drawn
    pub polylines: usize,
    /// Markers drawn
    pub markers: usize,
    /// Elements skipped, with the reason
    pub skipped: Vec<RenderError>,
    /// Bounds the viewport was fitted to, if anything was drawn
    pub bounds: Option<Bounds>,
}

/// All three views for one result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRoute {
    /// Summary panel
    pub summary: SummaryView,
    /// Warnings list
    pub warnings: ListView,
    /// Turn-by-turn list
    pub steps: ListView,
    /// Map overlay outcome
    pub map: RenderReport,
}

/// Build the summary panel for a result
#[must_use]
pub fn summarize(result: &RouteResult) -> SummaryView {
    SummaryView {
        distance: result
            .distance_km
            .map_or_else(|| PLACEHOLDER.to_string(), |km| format!("{km:.1} km")),
        duration: result
            .duration_min
            .map_or_else(|| PLACEHOLDER.to_string(), format_minutes),
        severity: Severity::from(result.risk_level),
        risk_label: risk_label(result.risk_level).to_string(),
        status_text: result.risk_status_text.clone(),
        nearest_bridge: result.nearest_bridge.map(|b| {
            format!(
                "Nearest bridge: {:.1} m, {:.0} m away",
                b.height_m, b.distance_m
            )
        }),
    }
}

/// Whole minutes, halves rounded up and never below zero
fn format_minutes(min: f64) -> String {
    let whole = min.round();
    let whole = if whole > 0.0 { whole } else { 0.0 };
    format!("{whole:.0} min")
}

/// Popup text for a bridge marker
#[must_use]
pub fn marker_popup(marker: &BridgeMarker) -> String {
    let mut lines = Vec::with_capacity(3);
    if let Some(message) = &marker.message {
        lines.push(message.clone());
    }
    if let Some(height) = marker.height_m {
        lines.push(format!("Clearance: {height:.1} m"));
    }
    lines.push(format!("Risk: {}", risk_label(marker.risk_level)));
    lines.join("\n")
}

/// Renders route results onto the views and a map widget
#[derive(Debug)]
pub struct RouteRenderer<M: MapPort> {
    map: M,
}

impl<M: MapPort> RouteRenderer<M> {
    /// Create a renderer drawing onto `map`
    pub const fn new(map: M) -> Self {
        Self { map }
    }

    /// The map widget
    pub const fn map(&self) -> &M {
        &self.map
    }

    /// Consume the renderer and return the map widget
    pub fn into_map(self) -> M {
        self.map
    }

    /// Render a result onto all views
    ///
    /// Never fails: elements that cannot be drawn are skipped and listed in
    /// [`RenderReport::skipped`].
    #[instrument(skip_all)]
    pub fn render(&mut self, result: &RouteResult) -> RenderedRoute {
        let map = self.draw_map(result);

        debug!(
            polylines = map.polylines,
            markers = map.markers,
            skipped = map.skipped.len(),
            "Rendered route"
        );

        RenderedRoute {
            summary: summarize(result),
            warnings: ListView::from_items(&result.warnings, NO_WARNINGS),
            steps: ListView::from_items(&result.steps, NO_STEPS),
            map,
        }
    }

    fn draw_map(&mut self, result: &RouteResult) -> RenderReport {
        for layer in LayerKind::ALL {
            self.map.clear_layer(layer);
        }

        let mut report = RenderReport::default();

        let lines = [
            (LayerKind::MainRoute, result.main_geometry.as_ref(), LineStyle::Solid),
            (LayerKind::AltRoute, result.alt_geometry.as_ref(), LineStyle::Dashed),
        ];
        for (layer, line, style) in lines {
            if let Some(line) = line {
                self.draw_line(layer, line, style, &mut report);
            }
        }

        for (index, marker) in result.bridge_markers.iter().enumerate() {
            let position = marker.position();
            if !position.is_valid() {
                let err = RenderError::InvalidMarker {
                    index,
                    reason: format!("position ({}, {}) out of range", marker.lat, marker.lon),
                };
                warn!(%err, "Skipping bridge marker");
                report.skipped.push(err);
                continue;
            }

            self.map.draw_marker(
                LayerKind::BridgeMarkers,
                position,
                marker_color(marker.risk_level),
                &marker_popup(marker),
            );
            report.markers += 1;
            report.bounds = Some(extend(report.bounds, Bounds::from_position(position)));
        }

        if let Some(bounds) = report.bounds {
            self.map.fit_bounds(bounds);
        }

        report
    }

    fn draw_line(
        &mut self,
        layer: LayerKind,
        line: &LineString,
        style: LineStyle,
        report: &mut RenderReport,
    ) {
        if let Some((index, position)) = line.first_invalid() {
            let err = RenderError::InvalidGeometry {
                layer,
                reason: format!(
                    "point {index} ({}, {}) out of range",
                    position.lon, position.lat
                ),
            };
            warn!(%err, "Skipping route geometry");
            report.skipped.push(err);
            return;
        }

        let Some(bounds) = line.bounds() else {
            return;
        };

        self.map.draw_polyline(layer, line, style);
        report.polylines += 1;
        report.bounds = Some(extend(report.bounds, bounds));
    }
}

fn extend(current: Option<Bounds>, other: Bounds) -> Bounds {
    current.map_or(other, |b| b.union(other))
}
