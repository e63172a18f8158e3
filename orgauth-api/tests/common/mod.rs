//! Common test utilities for integration tests
//!
//! Every test gets its own router over a fresh `MemoryStore`, driven
//! in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use orgauth_api::app::{build_router, AppState};
use orgauth_api::config::Config;
use orgauth_shared::store::MemoryStore;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub config: Config,
}

/// A registered user as seen by a client
pub struct TestUser {
    pub user_id: String,
    pub token: String,
    pub default_org_id: String,
}

impl TestUser {
    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Builds a context with extra environment variables layered on top
    pub fn with_env(extra: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = HashMap::from([
            (
                "DATABASE_URL".to_string(),
                "postgresql://localhost/orgauth_test".to_string(),
            ),
            ("JWT_SECRET".to_string(), JWT_SECRET.to_string()),
        ]);
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }

        let config = Config::from_lookup(|name| vars.get(name).cloned())
            .expect("test configuration is valid");

        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone(), config.clone()));

        Self { store, app, config }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Registers `first_name` with a derived email and returns the session
    pub async fn register(&self, first_name: &str) -> TestUser {
        let (status, body) = self
            .post("/auth/register", None, registration_body(first_name))
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

        let token = body["data"]["accessToken"].as_str().unwrap().to_string();
        let user_id = body["data"]["user"]["userId"].as_str().unwrap().to_string();

        let (_, orgs) = self.get("/api/organisations", Some(&token)).await;
        let default_org_id = orgs["data"]["organisations"][0]["orgId"]
            .as_str()
            .unwrap()
            .to_string();

        TestUser {
            user_id,
            token,
            default_org_id,
        }
    }
}

/// Valid registration payload for `first_name`
pub fn registration_body(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Doe",
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "password": "password",
        "phone": "1234567890",
    })
}
