//! Application configuration
//!
//! Loaded in layers: built-in defaults, then an optional `routesafe.toml`,
//! then environment variables such as `ROUTESAFE_ROUTING__BASE_URL`.

use std::fmt;
use std::path::Path;

use integration_routing::{ClientMode, RoutingConfig};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "routesafe";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ROUTESAFE";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing backend configuration
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// Demo server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Routing backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Which client answers route requests
    #[serde(default)]
    pub mode: ClientMode,

    /// Route endpoint path override
    #[serde(default)]
    pub route_path: Option<String>,

    /// Health endpoint path override
    #[serde(default)]
    pub health_path: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            mode: ClientMode::default(),
            route_path: None,
            health_path: None,
        }
    }
}

impl RoutingAppConfig {
    /// Convert to the route client configuration
    #[must_use]
    pub fn to_routing_config(&self) -> RoutingConfig {
        let defaults = RoutingConfig::default();
        RoutingConfig {
            base_url: self.base_url.clone(),
            route_path: self.route_path.clone().unwrap_or(defaults.route_path),
            health_path: self.health_path.clone().unwrap_or(defaults.health_path),
            timeout_secs: self.timeout_secs,
            mode: self.mode,
        }
    }
}

/// Demo server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `routesafe.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from a specific file and the environment
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            // e.g. ROUTESAFE_ROUTING__BASE_URL, ROUTESAFE_SERVER__PORT
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns every problem found, one per line.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if let Err(e) = self.routing.to_routing_config().validate() {
            problems.push(format!("routing: {e}"));
        }
        if self.server.host.trim().is_empty() {
            problems.push("server: host must not be empty".to_string());
        }
        if self.server.port == 0 {
            problems.push("server: port must be greater than 0".to_string());
        }
        if self.logging.filter.trim().is_empty() {
            problems.push("logging: filter must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("\n"))
        }
    }
}
