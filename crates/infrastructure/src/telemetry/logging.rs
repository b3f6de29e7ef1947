//! Logging initialization
//!
//! Logging to stderr through `tracing-subscriber`, pretty or JSON, with the
//! filter taken from `RUST_LOG` when set and from configuration otherwise.

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Failed to install the global subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the filter: `RUST_LOG` wins over the configured directive
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if `RUST_LOG` is unset and the
/// configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.filter).map_err(|e| TelemetryError::InvalidFilter {
            filter: config.filter.clone(),
            reason: e.to_string(),
        })
    })
}

/// Install the global tracing subscriber
///
/// Call once, early in `main`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };
    installed.map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = %config.format, filter = %config.filter, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LoggingConfig {
            filter: "routesafe=loudest".to_string(),
            format: LogFormat::Pretty,
        };
        // RUST_LOG, when set in the test environment, takes precedence
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(
                build_filter(&config),
                Err(TelemetryError::InvalidFilter { .. })
            ));
        }
    }

    #[test]
    fn test_valid_filter_builds() {
        let config = LoggingConfig {
            filter: "info,integration_routing=debug".to_string(),
            format: LogFormat::Json,
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::Init(_))
        ));
    }
}
