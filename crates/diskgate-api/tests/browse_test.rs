//! Read/browse path integration tests.
//!
//! Status endpoint, directory listing fallback with authorization, and the
//! file streaming path against a mocked remote disk API. The fallback runs
//! only on a not-found file; a backend outage must surface as a server
//! error, not a listing attempt.

mod helpers;

use helpers::{mint_access_token, setup_remote_app, setup_test_app};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_status_json() {
    let app = setup_test_app();
    app.disk.insert_file("/a.bin", vec![0; 128]);

    let response = app.server.get("/status.json").await;

    assert_eq!(response.status_code(), 200);
    let status: serde_json::Value = response.json();
    assert_eq!(status["used_space"], 128);
    assert!(status["total_space"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_listing_without_auth_is_not_found() {
    let app = setup_test_app();
    app.disk.insert_file("/pics/a.png", vec![1, 2, 3]);

    let response = app.server.get("/pics").await;

    // Unauthorized listing reads the same as an absent path
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_listing_with_auth_returns_entries_with_links() {
    let app = setup_test_app();
    app.disk.insert_file("/pics/a.png", vec![1, 2, 3]);
    app.disk.insert_file("/pics/raw/b.png", vec![4]);

    let response = app
        .server
        .get("/pics")
        .add_header("Authorization", format!("Bearer {}", mint_access_token()))
        .await;

    assert_eq!(response.status_code(), 200);
    let entries: serde_json::Value = response.json();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "a.png");
    assert_eq!(entries[0]["type"], "file");
    assert_eq!(entries[0]["size"], 3);
    assert_eq!(entries[0]["link"], "/pics/a.png");
    assert_eq!(entries[1]["name"], "raw");
    assert_eq!(entries[1]["type"], "dir");
    assert_eq!(entries[1]["link"], "/pics/raw");
}

#[tokio::test]
async fn test_percent_encoded_path_is_decoded() {
    let app = setup_test_app();
    app.disk.insert_file("/my photos/a.png", vec![1]);

    let response = app
        .server
        .get("/my%20photos")
        .add_header("Authorization", format!("Bearer {}", mint_access_token()))
        .await;

    assert_eq!(response.status_code(), 200);
    let entries: serde_json::Value = response.json();
    assert_eq!(entries[0]["name"], "a.png");
}

#[tokio::test]
async fn test_unknown_path_is_not_found_even_with_auth() {
    let app = setup_test_app();
    app.disk.insert_file("/pics/a.png", vec![1]);

    let response = app
        .server
        .get("/docs-archive")
        .add_header("Authorization", format!("Bearer {}", mint_access_token()))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_security_headers_are_present() {
    let app = setup_test_app();

    let response = app.server.get("/status.json").await;

    assert_eq!(response.header("X-Content-Type-Options"), "nosniff");
    assert_eq!(response.header("X-Frame-Options"), "DENY");
}

#[tokio::test]
async fn test_file_stream_via_remote_backend() {
    let mock_api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/resources/download"))
        .and(query_param("path", "/file.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": format!("{}/content/file.txt", mock_api.uri())
        })))
        .mount(&mock_api)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/file.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("hello world")
                .insert_header("Content-Type", "text/plain"),
        )
        .mount(&mock_api)
        .await;

    let server = setup_remote_app(&mock_api.uri());
    let response = server.get("/file.txt").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "hello world");
    assert_eq!(response.header("Content-Type"), "text/plain");
}

#[tokio::test]
async fn test_backend_failure_does_not_fall_back_to_listing() {
    let mock_api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/resources/download"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_api)
        .await;

    let server = setup_remote_app(&mock_api.uri());
    let response = server
        .get("/file.txt")
        .add_header("Authorization", format!("Bearer {}", mint_access_token()))
        .await;

    // A backend outage is a server error, never a listing attempt
    assert_eq!(response.status_code(), 500);
}

#[tokio::test]
async fn test_upload_via_remote_backend() {
    let mock_api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_space": 1_000_000u64,
            "used_space": 250_000u64
        })))
        .mount(&mock_api)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/resources/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": format!("{}/upload-here", mock_api.uri())
        })))
        .mount(&mock_api)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload-here"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_api)
        .await;

    let server = setup_remote_app(&mock_api.uri());
    let token = helpers::mint_upload_token("alice", 3600);
    let response = server
        .put(&format!("/upload-target/{}", token))
        .content_type("image/png")
        .bytes(bytes::Bytes::from_static(b"png bytes"))
        .await;

    assert_eq!(response.status_code(), 201);
    let stored_path = response.text();
    assert!(stored_path.starts_with('/'));
    assert!(stored_path.ends_with(".png"));
}
