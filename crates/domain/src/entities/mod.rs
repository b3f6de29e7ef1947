//! Domain entities

mod route_result;

pub use route_result::{BridgeMarker, NearestBridge, RouteResult};
