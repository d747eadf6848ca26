#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Weather routes end to end: router -> service -> reqwest client -> mocked upstream.

use apikit::{OpenApiRegistryImpl, RestfulModule};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use weather::{WeatherConfig, WeatherModule};

const FORECAST: &str = r#"{
    "success": "true",
    "result": {"resource_id": "F-C0032-001", "fields": []},
    "records": {
        "location": [{
            "locationName": "New Taipei City",
            "weatherElement": [{
                "elementName": "CI",
                "time": [{
                    "startTime": "2024-05-01 06:00:00",
                    "endTime": "2024-05-01 18:00:00",
                    "parameter": {"parameterName": "Warm"}
                }]
            }]
        }]
    }
}"#;

fn app_for(server: &MockServer) -> Router {
    let cfg = WeatherConfig {
        base_url: server.url("/datastore"),
        timeout_secs: 5,
        api_key: Some(SecretString::from("CWA-TEST-KEY")),
        ..WeatherConfig::default()
    };
    let module = WeatherModule::from_config(&cfg).unwrap();
    let registry = OpenApiRegistryImpl::new();
    module.register_rest(Router::new(), &registry).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let resp = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn query_route_relays_upstream_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/datastore/F-C0032-001")
                .query_param("locationName", "New Taipei City")
                .query_param("Authorization", "CWA-TEST-KEY");
            then.status(200)
                .header("content-type", "application/json")
                .body(FORECAST);
        })
        .await;

    let (status, _, body) = get(app_for(&server), "/api/weather?city=New%20Taipei%20City").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "true");
    assert_eq!(body["records"]["location"][0]["locationName"], "New Taipei City");
    assert_eq!(
        body["records"]["location"][0]["weatherElement"][0]["time"][0]["parameter"]["parameterName"],
        "Warm"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn path_route_uses_decoded_city() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/datastore/F-C0032-001")
                .query_param("locationName", "Taipei City");
            then.status(200).body(FORECAST);
        })
        .await;

    let (status, _, _) = get(app_for(&server), "/api/weatherbureau/Taipei%20City").await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_failure_is_generic_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500).body("boom");
        })
        .await;

    let (status, content_type, body) = get(app_for(&server), "/api/weatherbureau/Taipei").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(
        body["detail"],
        "An error occurred while processing your request."
    );
    assert_eq!(body["code"], "WEATHER_UPSTREAM");
    assert_eq!(body["instance"], "/api/weatherbureau/Taipei");
}

#[tokio::test]
async fn null_upstream_body_is_generic_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body("null");
        })
        .await;

    let (status, _, _) = get(app_for(&server), "/api/weather?city=Taipei").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_or_blank_city_is_400_without_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body(FORECAST);
        })
        .await;

    let (status, _, body) = get(app_for(&server), "/api/weather").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "WEATHER_BAD_REQUEST");

    let (status, _, _) = get(app_for(&server), "/api/weather?city=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn unreadable_city_input_is_problem_json_without_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body(FORECAST);
        })
        .await;

    let (status, content_type, body) =
        get(app_for(&server), "/api/weather?city=Taipei&city=Tainan").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "INVALID_REQUEST");

    let (status, content_type, body) = get(app_for(&server), "/api/weatherbureau/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["instance"], "/api/weatherbureau/%FF");

    mock.assert_hits_async(0).await;
}
