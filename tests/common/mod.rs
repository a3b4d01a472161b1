//! Test helpers for the HTTP integration tests.
//!
//! Provides an in-memory test server and helpers for registering users and
//! sending CSRF-protected requests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION};
use axum_test::{TestRequest, TestResponse, TestServer};
use quill::config::{BlogConfig, WebConfig};
use quill::web::handlers::AppState;
use quill::web::middleware::{JwtState, CSRF_COOKIE, CSRF_HEADER};
use quill::web::router::{create_health_router, create_router};
use quill::Database;
use serde_json::{json, Value};

/// Token used for both the CSRF cookie and header in tests.
pub const CSRF_TOKEN: &str = "test-csrf-token";

/// Create a test configuration.
pub fn create_test_config() -> WebConfig {
    WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret-key-for-testing-only".to_string(),
        ..WebConfig::default()
    }
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(create_test_config(), BlogConfig::default()).await
}

/// Create a test server with custom configuration.
pub async fn create_test_server_with(
    config: WebConfig,
    blog: BlogConfig,
) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(
        db.clone(),
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
        blog,
    ));
    let jwt_state = Arc::new(JwtState::new(&config.jwt_secret));

    let router = create_router(app_state, jwt_state, &config).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// A registered user.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register a user and return its id and access token.
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> TestUser {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123"
        }))
        .await;
    let body = response.json::<Value>();

    TestUser {
        id: body["data"]["user"]["id"].as_i64().expect("user id"),
        token: body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string(),
    }
}

/// Request helpers.
pub trait RequestExt {
    /// Authenticate as the user.
    fn auth(self, user: &TestUser) -> Self;
    /// Send a matching CSRF cookie and header.
    fn csrf(self) -> Self;
}

impl RequestExt for TestRequest {
    fn auth(self, user: &TestUser) -> Self {
        self.add_header(AUTHORIZATION, format!("Bearer {}", user.token))
    }

    fn csrf(self) -> Self {
        self.add_header(COOKIE, format!("{}={}", CSRF_COOKIE, CSRF_TOKEN))
            .add_header(CSRF_HEADER, CSRF_TOKEN)
    }
}

/// The `Location` header of a redirect.
pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Create a post as the user and return its id.
pub async fn create_post(server: &TestServer, user: &TestUser, title: &str, body: &str) -> i64 {
    let response = server
        .post("/posts")
        .auth(user)
        .csrf()
        .json(&json!({ "title": title, "body": body }))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);

    location(&response)
        .trim_start_matches("/posts/")
        .parse()
        .expect("post id in Location")
}
