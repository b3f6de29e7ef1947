//! Application-level errors

use domain::ValidationError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The route form failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The routing backend could not produce a route
    ///
    /// `message` is the text shown to the user verbatim: the backend's own
    /// detail when it sent one.
    #[error("{message}")]
    RouteRequest {
        /// HTTP status, when the backend answered at all
        status: Option<u16>,
        /// User-facing message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Create a route request error
    pub fn route_request(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RouteRequest {
            status,
            message: message.into(),
        }
    }

    /// Check if the user can fix this error by editing the form
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::RouteRequest { status, .. } => matches!(status, Some(400..=499)),
            Self::Configuration(_) => false,
        }
    }
}
