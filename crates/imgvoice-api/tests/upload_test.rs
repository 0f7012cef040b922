//! Upload flow integration tests.
//!
//! Run with: `cargo test -p imgvoice-api --test upload_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{
    build_server, test_app, test_config, FailingStorage, FakeDirectory, RecordingStorage,
    SlowStorage, TEST_BUCKET,
};
use imgvoice_api::views::{SUCCESS_HTML, UPLOAD_FORM_HTML};
use imgvoice_gateway::{DirectoryResolver, GatewaySummary};
use mockito::Matcher;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn image_form(filename: &str, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "image_file",
        Part::bytes(b"\x89PNG\r\n\x1a\nfake image".to_vec())
            .file_name(filename)
            .mime_type(content_type),
    )
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let server = test_app(
        test_config(&[]),
        Arc::new(RecordingStorage::new()),
        "http://127.0.0.1:1",
    );

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), UPLOAD_FORM_HTML);
    assert!(response.text().contains(r#"name="image_file""#));
    assert_eq!(
        response.header("x-content-type-options").to_str().unwrap(),
        "nosniff"
    );
    assert!(response
        .header("content-security-policy")
        .to_str()
        .unwrap()
        .contains("https://stackpath.bootstrapcdn.com"));
}

#[tokio::test]
async fn test_health() {
    let server = test_app(
        test_config(&[]),
        Arc::new(RecordingStorage::new()),
        "http://127.0.0.1:1",
    );

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_upload_stores_and_forwards() {
    let mut processing = mockito::Server::new_async().await;
    let mock = processing
        .mock("POST", "/prod/rekognition-polly")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "input_bucket": TEST_BUCKET,
            "input_bucket_file": "photo.PNG"
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), &processing.url());

    let response = server
        .post("/upload")
        .multipart(image_form("photo.PNG", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), SUCCESS_HTML);

    let uploads = storage.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].key, "photo.PNG");
    assert_eq!(uploads[0].content_type, "image/png");
    assert!(uploads[0].data.starts_with(b"\x89PNG"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_sanitizes_storage_key() {
    let mut processing = mockito::Server::new_async().await;
    let mock = processing
        .mock("POST", "/prod/rekognition-polly")
        .match_body(Matcher::Json(json!({
            "input_bucket": TEST_BUCKET,
            "input_bucket_file": "etc_my_holiday_photo.jpg"
        })))
        .with_status(200)
        .create_async()
        .await;

    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), &processing.url());

    let response = server
        .post("/upload")
        .multipart(image_form("../../etc/my holiday photo.jpg", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let key = storage.uploads()[0].key.clone();
    assert_eq!(key, "etc_my_holiday_photo.jpg");
    assert!(!key.contains('/') && !key.contains(".."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_disallowed_extension_redirects_without_side_effects() {
    let mut processing = mockito::Server::new_async().await;
    let mock = processing
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), &processing.url());

    let response = server
        .post("/upload")
        .multipart(image_form("archive.zip", "application/zip"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
    assert!(storage.uploads().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_field_redirects() {
    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), "http://127.0.0.1:1");

    let response = server
        .post("/upload")
        .multipart(MultipartForm::new().add_text("comment", "no file here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
    assert!(storage.uploads().is_empty());
}

#[tokio::test]
async fn test_empty_filename_redirects() {
    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), "http://127.0.0.1:1");

    let response = server
        .post("/upload")
        .multipart(image_form("", "application/octet-stream"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(storage.uploads().is_empty());
}

#[tokio::test]
async fn test_non_multipart_post_redirects() {
    let storage = Arc::new(RecordingStorage::new());
    let server = test_app(test_config(&[]), storage.clone(), "http://127.0.0.1:1");

    let response = server.post("/upload").text("image_file=photo.png").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
}

#[tokio::test]
async fn test_downstream_rejection_surfaces_body() {
    let mut processing = mockito::Server::new_async().await;
    processing
        .mock("POST", "/prod/rekognition-polly")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let server = test_app(
        test_config(&[]),
        Arc::new(RecordingStorage::new()),
        &processing.url(),
    );

    let response = server
        .post("/upload")
        .multipart(image_form("photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_ne!(response.text(), SUCCESS_HTML);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "DOWNSTREAM_ERROR");
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_storage_failure_skips_forwarding() {
    let mut processing = mockito::Server::new_async().await;
    let mock = processing
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let server = test_app(test_config(&[]), Arc::new(FailingStorage), &processing.url());

    let response = server
        .post("/upload")
        .multipart(image_form("photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "STORAGE_ERROR");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_storage_timeout() {
    let server = test_app(
        test_config(&[("STORAGE_TIMEOUT_SECS", "1")]),
        Arc::new(SlowStorage(Duration::from_secs(10))),
        "http://127.0.0.1:1",
    );

    let response = server
        .post("/upload")
        .multipart(image_form("photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.json::<Value>()["code"], "UPSTREAM_TIMEOUT");
}

#[tokio::test]
async fn test_unknown_gateway_is_reported() {
    let storage = Arc::new(RecordingStorage::new());
    let directory = FakeDirectory::new(vec![vec![
        GatewaySummary::new("abc123", "SomeOtherGateway"),
        GatewaySummary::new("def456", "JahnaviAPIGatewayStaging"),
    ]]);
    let server = build_server(
        test_config(&[]),
        storage.clone(),
        Arc::new(DirectoryResolver::new(directory, true)),
    );

    let response = server
        .post("/upload")
        .multipart(image_form("photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "GATEWAY_NOT_FOUND");
    assert_eq!(body["error"], "API Gateway 'JahnaviAPIGateway' not found.");
    // The upload itself already happened.
    assert_eq!(storage.uploads().len(), 1);
}

#[tokio::test]
async fn test_unreachable_processing_service() {
    let server = test_app(
        test_config(&[]),
        Arc::new(RecordingStorage::new()),
        "http://127.0.0.1:1",
    );

    let response = server
        .post("/upload")
        .multipart(image_form("photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_process_route_absent_in_direct_mode() {
    let server = test_app(
        test_config(&[]),
        Arc::new(RecordingStorage::new()),
        "http://127.0.0.1:1",
    );

    let response = server.get("/process_file/photo.png").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
