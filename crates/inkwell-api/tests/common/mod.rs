// Shared helpers for the HTTP-level tests. Every test gets a fresh
// in-memory database and drives the real router with `oneshot`.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{self, Request, StatusCode, header},
};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use inkwell_api::{AppState, AppStateInner, router};
use inkwell_core::{PasswordHasher, TokenService};
use inkwell_db::Database;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn app() -> TestApp {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        // Low cost keeps the suite fast
        hasher: PasswordHasher::new(4),
        tokens: TokenService::with_ttl("test-secret", Duration::hours(1), "1h"),
    });
    TestApp {
        router: router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: http::Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(http::Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(http::Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(http::Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(http::Method::DELETE, uri, token, None).await
    }

    /// Registers a user and logs them in. Returns (user_id, token).
    pub async fn register_and_login(&self, email: &str, username: &str) -> (Uuid, String) {
        let (status, user) = self
            .post(
                "/api/auth/register",
                None,
                json!({ "email": email, "username": username, "password": "password123" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", user);
        let user_id: Uuid = user["id"].as_str().unwrap().parse().unwrap();

        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": "password123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        (user_id, body["token"].as_str().unwrap().to_string())
    }

    pub async fn create_post(&self, token: &str, title: &str) -> Value {
        let (status, post) = self
            .post(
                "/api/posts",
                Some(token),
                json!({ "title": title, "content": "some content" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create post failed: {}", post);
        post
    }
}
