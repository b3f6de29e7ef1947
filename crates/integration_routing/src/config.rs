//! Routing client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which [`RouteClient`](crate::RouteClient) implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMode {
    /// Call the routing backend over HTTP
    #[default]
    Http,
    /// Answer every query with locally generated demo data
    Fixture,
    /// Call the backend, answering with demo data only when it is unreachable
    HttpWithFixtureFallback,
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Http => "http",
            Self::Fixture => "fixture",
            Self::HttpWithFixtureFallback => "http_with_fixture_fallback",
        };
        write!(f, "{s}")
    }
}

/// Configuration for the routing backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the route planning endpoint
    #[serde(default = "default_route_path")]
    pub route_path: String,

    /// Path of the health endpoint
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client implementation
    #[serde(default)]
    pub mode: ClientMode,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_route_path() -> String {
    "/api/route".to_string()
}

fn default_health_path() -> String {
    "/api/health".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            route_path: default_route_path(),
            health_path: default_health_path(),
            timeout_secs: default_timeout_secs(),
            mode: ClientMode::default(),
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Full URL of the route endpoint
    #[must_use]
    pub fn route_url(&self) -> String {
        join_url(&self.base_url, &self.route_path)
    }

    /// Full URL of the health endpoint
    #[must_use]
    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "base_url must start with http:// or https:// (got {})",
                self.base_url
            ));
        }

        if !self.route_path.starts_with('/') {
            return Err("route_path must start with '/'".to_string());
        }

        if !self.health_path.starts_with('/') {
            return Err("health_path must start with '/'".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
