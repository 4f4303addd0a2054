//! HTTP-level tests for the resource page routes.
//!
//! The router runs in-process with an in-memory entry source, so no network
//! or Contentful credentials are needed.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::CACHE_CONTROL, Request, StatusCode};
use contentful_client::testing::MockEntrySource;
use contentful_client::{EntriesResponse, EntrySource};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

fn landing_source() -> MockEntrySource {
    let landing: EntriesResponse = serde_json::from_value(json!({
        "items": [{
            "sys": { "id": "landing" },
            "fields": {
                "slug": "resources",
                "title": "Resources",
                "categories": [{ "sys": { "id": "cat" } }]
            }
        }],
        "includes": { "Entry": [{ "sys": { "id": "cat" }, "fields": { "internalName": "Tools" } }] }
    }))
    .unwrap();
    let resources: EntriesResponse = serde_json::from_value(json!({
        "items": [{ "sys": { "id": "res" }, "fields": {
            "url": "https://res.dev",
            "category": { "sys": { "id": "cat" } }
        } }]
    }))
    .unwrap();

    MockEntrySource::new()
        .with_response("resourceLandingPage", landing)
        .with_response("resourceEntry", resources)
}

fn app_with(source: Option<MockEntrySource>) -> axum::Router {
    let source = source.map(|s| Arc::new(s) as Arc<dyn EntrySource>);
    build_app(AppState::new(source, "resources"), Duration::from_secs(5))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cache_control, body)
}

#[tokio::test]
async fn test_returns_page_with_cache_header() {
    let source = landing_source();
    let app = app_with(Some(source.clone()));

    let (status, cache_control, body) = get(app, "/api/contentful?slug=resources").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_control.as_deref(), Some("public, max-age=30"));
    assert_eq!(body["id"], "landing");
    assert_eq!(body["categories"][0]["title"], "Tools");
    assert_eq!(body["resources"][0]["category"]["id"], "cat");
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn test_defaults_slug_and_parses_preview() {
    let source = landing_source();
    let app = app_with(Some(source.clone()));

    let (status, _, _) = get(app, "/api/contentful?preview=True").await;
    assert_eq!(status, StatusCode::OK);

    let (landing_query, options) = &source.calls()[0];
    assert_eq!(landing_query.slug.as_deref(), Some("resources"));
    assert!(options.preview);
}

#[tokio::test]
async fn test_missing_configuration_is_500() {
    let app = app_with(None);

    let (status, cache_control, body) = get(app, "/api/contentful").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cache_control.is_none());
    assert!(body["error"].as_str().unwrap().contains("CONTENTFUL_SPACE_ID"));
}

#[tokio::test]
async fn test_not_found_is_reported_as_error() {
    let source = MockEntrySource::new();
    let app = app_with(Some(source.clone()));

    let (status, _, body) = get(app, "/api/contentful?slug=nope").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Landing page entry not found for slug 'nope'");
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn test_upstream_error_message_is_forwarded() {
    let source = MockEntrySource::new().with_upstream_error(
        "resourceLandingPage",
        401,
        "AccessTokenInvalid: The access token is invalid.",
    );
    let app = app_with(Some(source));

    let (status, _, body) = get(app, "/api/contentful").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Contentful API error (401): AccessTokenInvalid: The access token is invalid."
    );
}

#[tokio::test]
async fn test_health_reports_configuration() {
    let (status, _, body) = get(app_with(None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["contentful"], "missing");

    let (_, _, body) = get(app_with(Some(landing_source())), "/health").await;
    assert_eq!(body["contentful"], "configured");
}
