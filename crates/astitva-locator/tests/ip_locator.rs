//! Integration tests for `IpLocator` using wiremock HTTP mocks.

use astitva_locator::{IpLocator, LocatorError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_locator(server: &MockServer) -> IpLocator {
    IpLocator::with_url(&format!("{}/json", server.uri()), 5, "astitva-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn locate_parses_numeric_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.7",
            "city": "New Delhi",
            "region": "National Capital Territory of Delhi",
            "country_name": "India",
            "latitude": 28.6139,
            "longitude": 77.209
        })))
        .mount(&server)
        .await;

    let location = test_locator(&server).locate().await.expect("should locate");
    assert!((location.coordinate.latitude - 28.6139).abs() < 1e-9);
    assert!((location.coordinate.longitude - 77.209).abs() < 1e-9);
    assert_eq!(location.city.as_deref(), Some("New Delhi"));
    assert_eq!(location.country.as_deref(), Some("India"));
}

#[tokio::test]
async fn locate_accepts_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": "19.0760",
            "longitude": "72.8777"
        })))
        .mount(&server)
        .await;

    let location = test_locator(&server).locate().await.expect("should locate");
    assert!((location.coordinate.latitude - 19.076).abs() < 1e-9);
    assert!(location.city.is_none());
}

#[tokio::test]
async fn locate_surfaces_service_error_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "reason": "RateLimited",
            "message": "Visit https://ipapi.co/ratelimited/ for details"
        })))
        .mount(&server)
        .await;

    let err = test_locator(&server).locate().await.unwrap_err();
    assert!(matches!(err, LocatorError::Provider(ref r) if r == "RateLimited"));
}

#[tokio::test]
async fn locate_rejects_missing_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Atlantis"})))
        .mount(&server)
        .await;

    let err = test_locator(&server).locate().await.unwrap_err();
    assert!(matches!(err, LocatorError::Schema { .. }), "got {err:?}");
}

#[tokio::test]
async fn locate_maps_too_many_requests_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = test_locator(&server).locate().await.unwrap_err();
    assert!(matches!(err, LocatorError::UnexpectedStatus { status: 429, .. }));
}
