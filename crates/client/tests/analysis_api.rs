//! Integration tests for [`AnalysisApi`] against in-process HTTP servers.

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use vislog_client::{AnalysisApi, ServiceCallError};
use vislog_core::analysis::{AnalysisResult, EnvelopeError};

/// Serve `app` on an ephemeral local port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// A service that always answers `POST /` with `body`.
async fn spawn_fixed(body: Value) -> String {
    spawn(Router::new().route("/", post(move || async move { Json(body) }))).await
}

fn client(url: String, timeout: Duration) -> AnalysisApi {
    AnalysisApi::with_client(reqwest::Client::new(), url, timeout)
}

// ---------------------------------------------------------------------------
// Test: well-formed envelopes come back unchanged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_envelope_is_returned_unchanged() {
    let url = spawn_fixed(json!({
        "success": true,
        "message": "success",
        "estimated_data": {"class": 3, "confidence": 0.92}
    }))
    .await;

    let result = client(url, Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap();

    assert_eq!(result, AnalysisResult::success(3, 0.92));
}

#[tokio::test]
async fn failure_envelope_is_returned_unchanged() {
    let url = spawn_fixed(json!({
        "success": false,
        "message": "Error:E50012",
        "estimated_data": {}
    }))
    .await;

    let result = client(url, Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap();

    assert_eq!(result, AnalysisResult::failure("Error:E50012"));
}

// ---------------------------------------------------------------------------
// Test: request body carries the image path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_body_contains_image_path() {
    // Echo the received path back through the failure message.
    let app = Router::new().route(
        "/",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "success": false,
                "message": body["image_path"],
                "estimated_data": {}
            }))
        }),
    );
    let url = spawn(app).await;

    let result = client(url, Duration::from_secs(10))
        .analyze("/image/test1.jpg")
        .await
        .unwrap();

    assert_eq!(result.message, "/image/test1.jpg");
}

// ---------------------------------------------------------------------------
// Test: failure modes map onto ServiceCallError variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_status_is_reported() {
    let app = Router::new().route(
        "/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let url = spawn(app).await;

    let err = client(url, Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ServiceCallError::Status { status: 500, ref body } if body == "model crashed");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let app = Router::new().route("/", post(|| async { "not json" }));
    let url = spawn(app).await;

    let err = client(url, Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ServiceCallError::Decode(_));
}

#[tokio::test]
async fn success_without_confidence_is_rejected() {
    let url = spawn_fixed(json!({
        "success": true,
        "message": "success",
        "estimated_data": {"class": 2}
    }))
    .await;

    let err = client(url, Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ServiceCallError::InvalidResponse(EnvelopeError::MissingField("confidence"))
    );
}

#[tokio::test]
async fn slow_service_times_out() {
    let app = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"success": false, "message": "late", "estimated_data": {}}))
        }),
    );
    let url = spawn(app).await;

    let err = client(url, Duration::from_millis(200))
        .analyze("/a/b.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ServiceCallError::Timeout(d) if d == Duration::from_millis(200));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn refused_connection_is_a_connect_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{addr}/"), Duration::from_secs(10))
        .analyze("/a/b.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ServiceCallError::Connect(_));
    assert!(err.to_string().starts_with("Connection error"));
}

#[tokio::test]
async fn empty_image_path_is_rejected_without_a_request() {
    // Nothing listens here; reaching the network would yield Connect instead.
    let err = client("http://127.0.0.1:9/".into(), Duration::from_secs(10))
        .analyze("")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ServiceCallError::InvalidRequest(EnvelopeError::EmptyImagePath)
    );
}
