//! Routing adapter - Implements RoutingPort using integration_routing

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{RouteQuery, RouteResult};
use integration_routing::{
    ClientMode, FallbackRouteClient, FixtureRouteClient, HttpRouteClient, RouteClient,
    RoutingConfig, RoutingError,
};
use tracing::{debug, info, instrument};

/// Adapter exposing a route client as the application's routing port
#[derive(Clone)]
pub struct RoutingAdapter {
    client: Arc<dyn RouteClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &self.client.name())
            .finish()
    }
}

impl RoutingAdapter {
    /// Wrap an existing route client
    #[must_use]
    pub fn new(client: Arc<dyn RouteClient>) -> Self {
        Self { client }
    }

    /// Build the client selected by `config.mode`
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client is needed and the configuration is
    /// invalid.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        let client: Arc<dyn RouteClient> = match config.mode {
            ClientMode::Http => Arc::new(Self::http_client(config)?),
            ClientMode::Fixture => Arc::new(FixtureRouteClient::new()),
            ClientMode::HttpWithFixtureFallback => Arc::new(FallbackRouteClient::new(
                Arc::new(Self::http_client(config)?),
                Arc::new(FixtureRouteClient::new()),
            )),
        };

        info!(mode = %config.mode, base_url = %config.base_url, "Routing adapter configured");
        Ok(Self { client })
    }

    fn http_client(config: &RoutingConfig) -> Result<HttpRouteClient, ApplicationError> {
        HttpRouteClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Name of the underlying client
    #[must_use]
    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    /// Convert a route client error to the application error shown to users
    fn map_error(err: RoutingError) -> ApplicationError {
        match err {
            RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::route_request(other.status(), other.message()),
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, query), fields(client = self.client.name()))]
    async fn plan_route(&self, query: &RouteQuery) -> Result<RouteResult, ApplicationError> {
        let result = self
            .client
            .request_route(query)
            .await
            .map_err(Self::map_error)?;

        debug!(
            risk = %result.risk_level,
            markers = result.bridge_markers.len(),
            "Route received"
        );
        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}
