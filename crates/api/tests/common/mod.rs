//! Common test utilities for integration tests.
//!
//! Every test builds its own application over a fresh in-memory store, so
//! tests can run in parallel without sharing session or device state.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use greenhouse_api::{
    app::{create_app, AppState},
    config::Config,
};
use persistence::{KeyValueStore, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt;

/// Password accepted by the strength policy.
pub const TEST_PASSWORD: &str = "Greenhouse1";

/// Test configuration on the memory backend.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// A test application with direct access to its state and store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Builds an app over an existing store, as after a restart.
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let state = AppState::new(test_config(), store.clone() as Arc<dyn KeyValueStore>)
            .expect("Failed to build app state");
        Self {
            router: create_app(state.clone()),
            state,
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(get_request(uri)).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: serde_json::Value) -> Response {
        self.send(json_request(method, uri, body)).await
    }

    pub async fn empty(&self, method: Method, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Registers `user` through the login page and returns the response body.
    pub async fn register(&self, user: &TestUser) -> serde_json::Value {
        let response = self
            .json(
                Method::POST,
                "/login/register",
                serde_json::json!({
                    "email": user.email,
                    "password": user.password,
                    "confirmPassword": user.password,
                    "name": user.display_name,
                }),
            )
            .await;
        let status = response.status();
        let body = parse_response_body(response).await;
        assert_eq!(status, StatusCode::CREATED, "Registration failed: {}", body);
        body
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.json(
            Method::POST,
            "/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn logout(&self) -> Response {
        self.empty(Method::POST, "/logout").await
    }

    /// Registers a fresh user, leaving the session authenticated.
    pub async fn authenticated() -> (Self, TestUser) {
        let app = Self::new();
        let user = TestUser::new();
        app.register(&user).await;
        (app, user)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a unique email for testing.
pub fn unique_test_email() -> String {
    format!("grower_{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Test user data.
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl TestUser {
    pub fn new() -> Self {
        Self {
            email: unique_test_email(),
            password: TEST_PASSWORD.to_string(),
            display_name: "Test Grower".to_string(),
        }
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Asserts a `303 See Other` to `location`.
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], location);
}
