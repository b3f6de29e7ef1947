//! Value Objects - Immutable, identity-less domain primitives

mod line_string;
mod risk_level;
mod route_query;

pub use line_string::{Bounds, LineString, Position};
pub use risk_level::RiskLevel;
pub use route_query::{RouteForm, RouteQuery};
