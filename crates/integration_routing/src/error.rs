//! Routing error types

use thiserror::Error;

/// Errors that can occur while requesting a route
///
/// Every variant carries a human-readable cause suitable for a status banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Connection to the routing backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend did not answer in time
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The backend answered with a non-2xx status
    #[error("Routing backend returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// The backend's `detail`, or `HTTP <status>` when it sent none
        message: String,
    },

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RoutingError {
    /// HTTP status for backend rejections
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user
    ///
    /// For backend rejections this is the backend's own detail text verbatim.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns true if the backend could not be reached at all
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout { .. })
    }
}
