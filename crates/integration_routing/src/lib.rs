//! Route planning backend integration for RouteSafe
//!
//! Turns a validated [`RouteQuery`](domain::RouteQuery) into a canonical
//! [`RouteResult`](domain::RouteResult) by calling a routing backend over
//! HTTP and normalizing whatever response shape it returns.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`RouteClient`] defines the interface, implemented by [`HttpRouteClient`]
//! (the real backend), [`FixtureRouteClient`] (deterministic demo data) and
//! [`FallbackRouteClient`] (primary client with a fixture fallback when the
//! backend is unreachable). Response handling lives in [`normalize`], which
//! applies an ordered table of candidate JSON paths per field.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::RouteForm;
//! use integration_routing::{HttpRouteClient, RouteClient, RoutingConfig};
//!
//! let config = RoutingConfig::default();
//! let client = HttpRouteClient::new(&config)?;
//!
//! let query = RouteForm::new("Leeds", "York", "4.2", true).validate()?;
//! let result = client.request_route(&query).await?;
//! ```

mod client;
mod config;
mod error;
mod fallback;
mod fixture;
mod models;
pub mod normalize;

pub use client::{HttpRouteClient, RouteClient};
pub use config::{ClientMode, RoutingConfig};
pub use error::RoutingError;
pub use fallback::FallbackRouteClient;
pub use fixture::{FixtureRouteClient, build_fixture_response, classify_clearance};
pub use models::{
    BridgeRisk, ErrorBody, ErrorDetail, ErrorItem, LineStringGeometry, RouteRequest,
    RouteResponse, RouteSummary, WireBridgeMarker,
};
pub use normalize::{normalize, parse_route_body};
