//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;

/// Create the router with all demo API routes
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/route", post(handlers::route::plan_route))
}
