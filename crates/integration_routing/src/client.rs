//! HTTP route client
//!
//! Sends the canonical route request to the routing backend and normalizes
//! whatever comes back.

use std::time::Duration;

use async_trait::async_trait;
use domain::{RouteQuery, RouteResult};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{ErrorBody, RouteRequest};
use crate::normalize::parse_route_body;

/// Trait for route planning clients
#[async_trait]
pub trait RouteClient: Send + Sync {
    /// Request a route for a validated query
    ///
    /// Issues exactly one backend call; there are no automatic retries.
    async fn request_route(&self, query: &RouteQuery) -> Result<RouteResult, RoutingError>;

    /// Check if the routing backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Route client talking to a routing backend over HTTP
#[derive(Debug)]
pub struct HttpRouteClient {
    client: Client,
    config: RoutingConfig,
}

impl HttpRouteClient {
    /// Create a new HTTP route client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("RouteSafe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built from
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn transport_error(&self, e: &reqwest::Error) -> RoutingError {
        if e.is_timeout() {
            RoutingError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            RoutingError::ConnectionFailed(e.to_string())
        }
    }

    /// Build the error for a non-2xx response from its body
    fn rejection(status: StatusCode, body: &str) -> RoutingError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.detail.into_message())
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        RoutingError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RouteClient for HttpRouteClient {
    #[instrument(skip(self, query), fields(start = %query.start(), end = %query.end()))]
    async fn request_route(&self, query: &RouteQuery) -> Result<RouteResult, RoutingError> {
        let url = self.config.route_url();
        let request = RouteRequest::from(query);

        debug!(?url, height_m = request.vehicle_height_m, "Requesting route");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let err = Self::rejection(status, &body);
            warn!(status = status.as_u16(), message = %err.message(), "Routing backend rejected request");
            return Err(err);
        }

        let result = parse_route_body(&body)?;

        if result.main_geometry.is_none() {
            warn!("Route response has no usable geometry");
        }

        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.config.health_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Routing backend health check failed");
                false
            },
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
