//! Integration tests for the demo API routes
#![allow(clippy::expect_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use presentation_http::create_router;
use serde_json::{Value, json};

fn create_test_server() -> TestServer {
    TestServer::new(create_router()).expect("Failed to create test server")
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_route_returns_canonical_shape() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({
            "start": "Leeds",
            "end": "York",
            "vehicle_height_m": 4.0,
            "avoid_low_bridges": true
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["summary"]["distance_km"].as_f64().is_some());
    assert!(body["summary"]["duration_min"].as_f64().is_some());
    assert!(body["bridge_risk"]["level"].as_str().is_some());
    assert_eq!(body["geometry"]["type"], "LineString");
    assert!(body["geometry"]["coordinates"].as_array().is_some_and(|c| c.len() >= 2));
    assert!(body["bridge_markers"].as_array().is_some());
    assert!(body["steps"].as_array().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_route_is_deterministic() {
    let server = create_test_server();
    let request = json!({ "start": "Leeds", "end": "York", "vehicle_height_m": 4.5 });

    let first: Value = server.post("/api/route").json(&request).await.json();
    let second: Value = server.post("/api/route").json(&request).await.json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_tall_vehicle_gets_alternative_route() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "Leeds", "end": "York", "vehicle_height_m": 6.0 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["alt_geometry"]["type"], "LineString");
}

#[tokio::test]
async fn test_route_rejects_non_positive_height() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "Leeds", "end": "York", "vehicle_height_m": 0 }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "detail": "Vehicle height must be > 0" }));
}

#[tokio::test]
async fn test_route_rejects_blank_location() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "  ", "end": "York", "vehicle_height_m": 4.0 }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "detail": "Start location is required" }));
}

#[tokio::test]
async fn test_route_rejects_identical_locations() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "York", "end": "york", "vehicle_height_m": 4.0 }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "detail": "Start and end locations must differ" }));
}

#[tokio::test]
async fn test_route_missing_field_is_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "Leeds", "vehicle_height_m": 4.0 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    let items = body["detail"].as_array().expect("detail should be a list");
    assert_eq!(items.len(), 1);
    assert!(items[0]["msg"].as_str().is_some_and(|m| m.contains("end")));
}

#[tokio::test]
async fn test_route_wrong_type_is_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/api/route")
        .json(&json!({ "start": "Leeds", "end": "York", "vehicle_height_m": "tall" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
