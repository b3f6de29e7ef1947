//! Integration tests for the route clients (wiremock-based)

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain::{RiskLevel, RouteQuery};
use integration_routing::{
    FallbackRouteClient, FixtureRouteClient, HttpRouteClient, RouteClient, RoutingConfig,
    RoutingError,
};

fn config_for_mock(base_url: &str) -> RoutingConfig {
    RoutingConfig {
        base_url: base_url.to_string(),
        timeout_secs: 1,
        ..RoutingConfig::default()
    }
}

/// A local URL nothing listens on
fn unused_local_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn sample_query() -> RouteQuery {
    RouteQuery::new("Leeds", "York", 4.0, true).unwrap()
}

fn canonical_route_json() -> serde_json::Value {
    json!({
        "summary": { "distance_km": 27.3, "duration_min": 42.0 },
        "bridge_risk": {
            "level": "medium",
            "status_text": "Bridge clearance near the limit",
            "nearest_bridge_height_m": 4.1,
            "nearest_bridge_distance_m": 120.0
        },
        "warnings": ["Low bridge on Kirkstall Road"],
        "steps": ["Depart Leeds", "Arrive at York"],
        "geometry": {
            "type": "LineString",
            "coordinates": [[-1.55, 53.80], [-1.08, 53.96]]
        },
        "alt_geometry": null,
        "bridge_markers": [
            { "lat": 53.85, "lon": -1.40, "height_m": 4.1, "risk_level": "medium", "message": "Bridge 4.1 m" }
        ]
    })
}

#[tokio::test]
async fn test_request_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "start": "Leeds",
            "end": "York",
            "vehicle_height_m": 4.0,
            "avoid_low_bridges": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(canonical_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.request_route(&sample_query()).await.unwrap();

    assert_eq!(result.distance_km, Some(27.3));
    assert_eq!(result.duration_min, Some(42.0));
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.warnings, vec!["Low bridge on Kirkstall Road"]);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.main_geometry.map(|g| g.len()), Some(2));
    assert!(result.alt_geometry.is_none());
    assert_eq!(result.bridge_markers.len(), 1);
    assert_eq!(result.nearest_bridge.map(|b| b.height_m), Some(4.1));
}

#[tokio::test]
async fn test_request_route_alternative_backend_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metrics": { "distance_km": "14.2", "duration_min": 21 },
            "main_route": { "coords": [[-1.6, 53.8], [-1.55, 53.75], [-1.5, 53.7]] },
            "bridge_result": { "risk_level": "Conflict", "status_text": "Vehicle too tall" },
            "bridges": [{ "latitude": 53.75, "lng": -1.55, "height": 3.6, "risk": "Conflict" }]
        })))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.request_route(&sample_query()).await.unwrap();

    assert_eq!(result.distance_km, Some(14.2));
    assert_eq!(result.duration_min, Some(21.0));
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.risk_status_text.as_deref(), Some("Vehicle too tall"));
    assert_eq!(result.main_geometry.map(|g| g.len()), Some(3));
    assert_eq!(result.bridge_markers[0].risk_level, RiskLevel::High);
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_request_route_rejection_with_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Vehicle height must be > 0" })),
        )
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Vehicle height must be > 0");
}

#[tokio::test]
async fn test_request_route_validation_items() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "start"], "msg": "field required" }]
        })))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "field required");
}

#[tokio::test]
async fn test_request_route_server_error_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert_eq!(
        err,
        RoutingError::Http {
            status: 500,
            message: "HTTP 500".to_string()
        }
    );
}

#[tokio::test]
async fn test_request_route_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert!(matches!(err, RoutingError::ParseError(_)));
}

#[tokio::test]
async fn test_request_route_empty_object_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.request_route(&sample_query()).await.unwrap();

    assert!(result.distance_km.is_none());
    assert!(result.main_geometry.is_none());
    assert_eq!(result.risk_level, RiskLevel::Unknown);
}

#[tokio::test]
async fn test_request_route_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(canonical_route_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert_eq!(err, RoutingError::Timeout { timeout_secs: 1 });
    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_request_route_connection_refused() {
    let uri = unused_local_uri();

    let client = HttpRouteClient::new(&config_for_mock(&uri)).unwrap();
    let err = client.request_route(&sample_query()).await.unwrap_err();

    assert!(matches!(err, RoutingError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_health_check_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn test_health_check_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(!client.is_healthy().await);
}

#[tokio::test]
async fn test_fallback_serves_fixture_when_backend_down() {
    let uri = unused_local_uri();

    let primary = Arc::new(HttpRouteClient::new(&config_for_mock(&uri)).unwrap());
    let client = FallbackRouteClient::new(primary, Arc::new(FixtureRouteClient::new()));

    let result = client.request_route(&sample_query()).await.unwrap();
    assert!(result.main_geometry.is_some());
    assert!(
        result
            .risk_status_text
            .as_deref()
            .is_some_and(|t| t.contains("demo data"))
    );
}

#[tokio::test]
async fn test_fallback_does_not_mask_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/route"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Unknown location" })),
        )
        .mount(&server)
        .await;

    let primary = Arc::new(HttpRouteClient::new(&config_for_mock(&server.uri())).unwrap());
    let client = FallbackRouteClient::new(primary, Arc::new(FixtureRouteClient::new()));

    let err = client.request_route(&sample_query()).await.unwrap_err();
    assert_eq!(err.message(), "Unknown location");
}
