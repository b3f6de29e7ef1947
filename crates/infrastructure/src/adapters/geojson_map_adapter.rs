//! GeoJSON map adapter - Implements MapPort by building a FeatureCollection
//!
//! Stands in for an interactive map widget: every drawn element becomes a
//! GeoJSON feature tagged with its layer, so the overlay can be written to a
//! file and opened in any GeoJSON viewer.

use std::collections::BTreeMap;

use application::ports::{LayerKind, LineStyle, MapPort};
use domain::{Bounds, LineString, Position};
use serde_json::{Value, json};
use tracing::trace;

/// Map widget that records the overlay as GeoJSON features
#[derive(Debug, Clone, Default)]
pub struct GeoJsonMapAdapter {
    layers: BTreeMap<LayerKind, Vec<Value>>,
    viewport: Option<Bounds>,
}

impl GeoJsonMapAdapter {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Features currently drawn on a layer
    #[must_use]
    pub fn layer(&self, layer: LayerKind) -> &[Value] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of features across all layers
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// The last bounds the view was fitted to
    #[must_use]
    pub const fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// Export all layers as one FeatureCollection
    ///
    /// The fitted viewport, if any, is written as the collection's `bbox`.
    #[must_use]
    pub fn to_feature_collection(&self) -> Value {
        let features: Vec<Value> = LayerKind::ALL
            .iter()
            .flat_map(|layer| self.layer(*layer).iter().cloned())
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(b) = self.viewport {
            collection["bbox"] = json!([b.min_lon, b.min_lat, b.max_lon, b.max_lat]);
        }
        collection
    }

    fn push(&mut self, layer: LayerKind, feature: Value) {
        self.layers.entry(layer).or_default().push(feature);
    }
}

impl MapPort for GeoJsonMapAdapter {
    fn clear_layer(&mut self, layer: LayerKind) {
        trace!(%layer, "Clearing layer");
        self.layers.remove(&layer);
    }

    fn draw_polyline(&mut self, layer: LayerKind, line: &LineString, style: LineStyle) {
        let coordinates: Vec<[f64; 2]> = line.positions().iter().map(|p| [p.lon, p.lat]).collect();
        self.push(
            layer,
            json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": coordinates },
                "properties": { "layer": layer, "style": style },
            }),
        );
    }

    fn draw_marker(&mut self, layer: LayerKind, position: Position, color: &str, popup: &str) {
        self.push(
            layer,
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [position.lon, position.lat] },
                "properties": { "layer": layer, "marker-color": color, "popup": popup },
            }),
        );
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }
}
