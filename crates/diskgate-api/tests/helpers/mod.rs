//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p diskgate-api`. Uses the in-memory
//! storage backend; no external services needed. Remote-backend tests mock
//! the disk REST API with wiremock.

#![allow(dead_code)]

use axum_test::TestServer;
use diskgate_api::setup::routes::setup_routes;
use diskgate_api::state::AppState;
use diskgate_api::utils::upload_token;
use diskgate_core::models::UploadTargetClaims;
use diskgate_core::{Config, GatewayConfig, StorageBackend};
use diskgate_storage::{Disk, MemoryDisk, RemoteDisk};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config(Box::new(GatewayConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        token_list: Vec::new(),
        environment: "test".to_string(),
        max_upload_size_bytes: 64 * 1024 * 1024,
        storage_backend: Some(StorageBackend::Memory),
        disk_api_base_url: "http://localhost".to_string(),
    }))
}

/// Test application: server plus a handle on the backing memory disk.
pub struct TestApp {
    pub server: TestServer,
    pub disk: MemoryDisk,
}

/// Setup test app backed by an in-memory disk.
pub fn setup_test_app() -> TestApp {
    let disk = MemoryDisk::new();
    let server = server_with_disk(Arc::new(disk.clone()));
    TestApp { server, disk }
}

pub fn server_with_disk(disk: Arc<dyn Disk>) -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone(), disk));
    let router = setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}

/// Setup test app backed by a RemoteDisk pointed at a mock disk API.
pub fn setup_remote_app(base_url: &str) -> TestServer {
    let disk =
        RemoteDisk::new(base_url, vec!["account-token".to_string()]).expect("remote disk setup");
    server_with_disk(Arc::new(disk))
}

/// Mint a signed upload token with the given subject and time-to-live.
pub fn mint_upload_token(sub: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = UploadTargetClaims {
        sub: sub.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    upload_token::create(&claims, TEST_JWT_SECRET.as_bytes()).expect("Failed to mint upload token")
}

/// Mint a browse access token accepted by the listing authorization check.
pub fn mint_access_token() -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "admin", "exp": exp }),
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint access token")
}
