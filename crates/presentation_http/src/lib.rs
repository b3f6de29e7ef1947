//! RouteSafe demo backend
//!
//! Serves the route API (`/api/health`, `/api/route`) with generated demo
//! routes so the planner can be exercised without a real routing engine.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::ApiError;
pub use middleware::ValidatedJson;
pub use routes::create_router;
