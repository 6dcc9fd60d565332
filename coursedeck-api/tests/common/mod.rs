//! Common test utilities for integration tests
//!
//! Each test builds its own router around a fresh in-memory store, so tests
//! are independent and need no external services.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use coursedeck_api::app::{build_router, AppState};
use coursedeck_api::config::Config;
use coursedeck_shared::store::Store;
use serde_json::Value;
use tower::Service as _;

/// Test context holding the router and its state
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
}

/// Status and decoded JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    /// Creates a context with an empty store and default configuration
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    /// Creates a context around a pre-populated store
    pub fn with_store(store: Store) -> Self {
        let state = AppState::with_store(store, Config::default());
        let app = build_router(state.clone());
        TestContext { app, state }
    }

    /// Sends a request with an optional JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, None).await
    }
}

/// Asserts a status, printing the body on mismatch
pub fn expect_status(response: &TestResponse, status: StatusCode) {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {}",
        response.body
    );
}

/// Creates a course and returns its ID
pub async fn create_course(
    ctx: &TestContext,
    name: &str,
    category: &str,
    level: &str,
    price: f64,
    discount: f64,
) -> i64 {
    let response = ctx
        .post(
            "/v1/courses",
            serde_json::json!({
                "name": name,
                "description": format!("{} from first principles.", name),
                "category": category,
                "level": level,
                "price": price,
                "discount": discount,
                "tags": ["rust"]
            }),
        )
        .await;
    expect_status(&response, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

/// Creates a todo and returns its ID
pub async fn create_todo(ctx: &TestContext, text: &str, status: &str) -> i64 {
    let response = ctx
        .post(
            "/v1/todos",
            serde_json::json!({ "text": text, "status": status }),
        )
        .await;
    expect_status(&response, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}
