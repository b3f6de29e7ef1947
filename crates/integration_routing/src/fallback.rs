//! Composite client that falls back when the primary backend is unreachable

use std::sync::Arc;

use async_trait::async_trait;
use domain::{RouteQuery, RouteResult};
use tracing::{instrument, warn};

use crate::client::RouteClient;
use crate::error::RoutingError;

/// Tries `primary` first and retries with `fallback` on connection failures
///
/// Backend rejections and parse errors are returned as-is; only an
/// unreachable or timed-out primary triggers the fallback.
pub struct FallbackRouteClient {
    primary: Arc<dyn RouteClient>,
    fallback: Arc<dyn RouteClient>,
}

impl std::fmt::Debug for FallbackRouteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRouteClient")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl FallbackRouteClient {
    /// Create a new fallback client
    #[must_use]
    pub fn new(primary: Arc<dyn RouteClient>, fallback: Arc<dyn RouteClient>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl RouteClient for FallbackRouteClient {
    #[instrument(skip(self, query), fields(primary = self.primary.name(), fallback = self.fallback.name()))]
    async fn request_route(&self, query: &RouteQuery) -> Result<RouteResult, RoutingError> {
        match self.primary.request_route(query).await {
            Err(e) if e.is_unreachable() => {
                warn!(error = %e, "Primary routing backend unreachable, using fallback");
                self.fallback.request_route(query).await
            },
            other => other,
        }
    }

    async fn is_healthy(&self) -> bool {
        self.primary.is_healthy().await
    }

    fn name(&self) -> &'static str {
        "http_with_fixture_fallback"
    }
}
