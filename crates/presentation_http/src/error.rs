//! API error handling
//!
//! Errors are rendered as `{"detail": ...}`: a plain string for request
//! errors, a list of `{"msg": ...}` items for bodies that do not parse.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use integration_routing::{ErrorBody, ErrorDetail, ErrorItem};
use thiserror::Error;
use tracing::debug;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is well-formed but not acceptable
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body could not be read as a route request
    #[error("Unprocessable request: {}", .0.join("; "))]
    Unprocessable(Vec<String>),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "Rejecting request");

        let detail = match self {
            Self::BadRequest(msg) => ErrorDetail::Message(msg),
            Self::Unprocessable(msgs) => {
                ErrorDetail::Items(msgs.into_iter().map(|msg| ErrorItem { msg }).collect())
            },
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
