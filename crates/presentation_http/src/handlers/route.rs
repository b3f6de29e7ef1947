//! Route planning handler
//!
//! Answers with generated demo data in the canonical response shape.

use axum::Json;
use integration_routing::{RouteRequest, RouteResponse, build_fixture_response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use validator::{Validate, ValidationError};

use crate::error::ApiError;
use crate::middleware::ValidatedJson;

/// Upper bound for a road vehicle height in metres
const MAX_VEHICLE_HEIGHT_M: f64 = 10.0;

/// Route request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RouteRequestDto {
    /// Start location, free text
    #[validate(custom(function = "not_blank", message = "Start location is required"))]
    pub start: String,

    /// End location, free text
    #[validate(custom(function = "not_blank", message = "End location is required"))]
    pub end: String,

    /// Vehicle height in metres
    #[validate(custom(function = "plausible_height"))]
    pub vehicle_height_m: f64,

    /// Ask for a route that avoids low bridges
    #[serde(default = "default_avoid")]
    pub avoid_low_bridges: bool,
}

const fn default_avoid() -> bool {
    true
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn plausible_height(height: f64) -> Result<(), ValidationError> {
    if height <= 0.0 {
        return Err(ValidationError::new("range").with_message("Vehicle height must be > 0".into()));
    }
    if height > MAX_VEHICLE_HEIGHT_M {
        return Err(ValidationError::new("range")
            .with_message(format!("Vehicle height must be at most {MAX_VEHICLE_HEIGHT_M} m").into()));
    }
    Ok(())
}

impl From<RouteRequestDto> for RouteRequest {
    fn from(dto: RouteRequestDto) -> Self {
        Self {
            start: dto.start.trim().to_string(),
            end: dto.end.trim().to_string(),
            vehicle_height_m: dto.vehicle_height_m,
            avoid_low_bridges: dto.avoid_low_bridges,
        }
    }
}

/// Plan a route
#[instrument(skip_all)]
pub async fn plan_route(
    ValidatedJson(req): ValidatedJson<RouteRequestDto>,
) -> Result<Json<RouteResponse>, ApiError> {
    let request = RouteRequest::from(req);
    debug!(start = %request.start, end = %request.end, "Route request");

    if request.start.eq_ignore_ascii_case(&request.end) {
        return Err(ApiError::BadRequest(
            "Start and end locations must differ".to_string(),
        ));
    }

    let response = build_fixture_response(&request);
    info!(
        distance_km = response.summary.distance_km,
        risk = %response.bridge_risk.level,
        alternative = response.alt_geometry.is_some(),
        "Planned demo route"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(start: &str, end: &str, height: f64) -> RouteRequestDto {
        RouteRequestDto {
            start: start.to_string(),
            end: end.to_string(),
            vehicle_height_m: height,
            avoid_low_bridges: true,
        }
    }

    #[test]
    fn test_valid_dto() {
        assert!(dto("Leeds", "York", 4.0).validate().is_ok());
    }

    #[test]
    fn test_blank_start_is_invalid() {
        let errors = dto("  ", "York", 4.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("start"));
    }

    #[test]
    fn test_height_bounds() {
        assert!(dto("Leeds", "York", 0.0).validate().is_err());
        assert!(dto("Leeds", "York", -1.0).validate().is_err());
        assert!(dto("Leeds", "York", 12.0).validate().is_err());
        assert!(dto("Leeds", "York", 10.0).validate().is_ok());
    }

    #[test]
    fn test_non_positive_height_message() {
        let errors = dto("Leeds", "York", 0.0).validate().unwrap_err();
        let message = errors.field_errors()["vehicle_height_m"][0]
            .message
            .clone()
            .unwrap_or_default();
        assert_eq!(message, "Vehicle height must be > 0");
    }

    #[test]
    fn test_dto_is_trimmed() {
        let request = RouteRequest::from(dto(" Leeds ", "York\n", 4.0));
        assert_eq!(request.start, "Leeds");
        assert_eq!(request.end, "York");
    }

    #[tokio::test]
    async fn test_same_start_and_end_rejected() {
        let err = plan_route(ValidatedJson(dto("Leeds", "leeds", 4.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
