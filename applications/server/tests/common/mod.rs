//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fave_core::UserStore;
use fave_server::{create_router, AppState, TokenService};
use fave_storage::SqliteUserStore;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}

/// Create a file-backed test store with migrations applied
///
/// The returned `TempDir` must be kept alive for the duration of the test.
pub async fn create_test_store() -> (Arc<SqliteUserStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let store = SqliteUserStore::connect(&db_url).await.unwrap();
    (Arc::new(store), temp_dir)
}

pub fn create_test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TEST_SECRET, 60))
}

/// A router over a fresh database, plus handles for inspecting it
pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenService>,
    pub store: Arc<SqliteUserStore>,
    _temp_dir: TempDir,
}

pub async fn create_test_app() -> TestApp {
    let (store, temp_dir) = create_test_store().await;
    let tokens = create_test_token_service();
    let router = create_test_router(store.clone(), Arc::clone(&tokens));

    TestApp {
        router,
        tokens,
        store,
        _temp_dir: temp_dir,
    }
}

pub fn create_test_router(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Router {
    create_router(AppState::new(store, tokens, TEST_BCRYPT_COST))
}

/// Send a request and decode the JSON response body
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Register and log in through the API, returning the bearer token
pub async fn register_and_login(router: &Router, username: &str, password: &str) -> String {
    let credentials = serde_json::json!({ "username": username, "password": password });

    let (status, _) = send(router, Method::POST, "/api/user/register", Some(credentials.clone()), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router, Method::POST, "/api/user/login", Some(credentials), None).await;
    assert_eq!(status, StatusCode::OK);

    body["token"].as_str().unwrap().to_string()
}
