//! Routing service port
//!
//! Defines the interface for requesting routes from a routing backend.
//! Adapters in the infrastructure layer implement this port on top of the
//! route clients.

use async_trait::async_trait;
use domain::{RouteQuery, RouteResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route planning
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Plan a route for a validated query
    ///
    /// One backend call per invocation. Failures come back as
    /// [`ApplicationError::RouteRequest`] carrying the user-facing message.
    async fn plan_route(&self, query: &RouteQuery) -> Result<RouteResult, ApplicationError>;

    /// Check if the routing backend is available
    async fn is_healthy(&self) -> bool;
}
