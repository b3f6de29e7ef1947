//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using
//! the validator crate. Bodies that do not deserialize are rejected with 422,
//! bodies that deserialize but fail validation with 400.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::Unprocessable(vec![e.body_text()]))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(describe(&e)))?;

        Ok(Self(value))
    }
}

/// One message per failed check, ordered by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field}: {}", error.code), ToString::to_string)
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, max = 10))]
        #[serde(default = "one")]
        count: u32,
    }

    const fn one() -> u32 {
        1
    }

    async fn test_handler(ValidatedJson(req): ValidatedJson<TestRequest>) -> String {
        req.name
    }

    async fn post_body(body: &'static str) -> StatusCode {
        Router::new()
            .route("/test", post(test_handler))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/test")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        assert_eq!(post_body(r#"{"name": "a"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_validation_is_bad_request() {
        assert_eq!(post_body(r#"{"name": ""}"#).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_unprocessable() {
        assert_eq!(post_body(r#"{"name": 5}"#).await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(post_body("not json").await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn describe_uses_message_or_code() {
        let req = TestRequest {
            name: String::new(),
            count: 20,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(describe(&errors), "count: range; Name is required");
    }
}
