//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geojson_map_adapter;
mod routing_adapter;

pub use geojson_map_adapter::GeoJsonMapAdapter;
pub use routing_adapter::RoutingAdapter;
