//! Shared helpers for router-level tests.

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use lib_core::model::store::{MemoryTodoStore, MemoryUserStore};
use lib_core::{Config, EnvMode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";
pub const TEST_PASSWORD: &str = "secret1";

pub fn test_config() -> Config {
    Config {
        port: 8000,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 15,
        env_mode: EnvMode::Development,
        frontend_url: "http://localhost:5173".to_string(),
    }
}

pub fn test_state_with(config: Config) -> AppState {
    AppState::new(
        config,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryTodoStore::new()),
    )
}

pub fn test_state() -> AppState {
    test_state_with(test_config())
}

pub fn test_app() -> Router {
    create_router(test_state())
}

fn with_session(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::COOKIE, format!("token={}", token)),
        None => builder,
    }
}

pub fn get_req(uri: &str, token: Option<&str>) -> Request<Body> {
    with_session(Request::builder().method(Method::GET).uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn empty_req(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    with_session(Request::builder().method(method).uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn json_req(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    with_session(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Raw `Set-Cookie` header for the session cookie, if the response set one.
pub fn set_cookie_header(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(str::to_string)
}

/// Session token value from the response's `Set-Cookie`, if any.
pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    set_cookie_header(res).and_then(|raw| {
        raw.trim_start_matches("token=")
            .split(';')
            .next()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn register_body(username: &str, email: &str) -> Value {
    json!({
        "first_name": "Test",
        "last_name": "User",
        "username": username,
        "email": email,
        "password": TEST_PASSWORD,
    })
}

/// Register an account and return its session token.
pub async fn register(app: &Router, username: &str, email: &str) -> String {
    let res = app
        .clone()
        .oneshot(json_req(Method::POST, "/api/v1/register", None, &register_body(username, email)))
        .await
        .unwrap();

    session_cookie(&res).expect("register should set the session cookie")
}

/// Create a todo as `token` and return its id.
pub async fn create_todo(app: &Router, token: &str, title: &str) -> i64 {
    let res = app
        .clone()
        .oneshot(json_req(Method::POST, "/api/v1/todos/new", Some(token), &json!({ "title": title })))
        .await
        .unwrap();

    body_json(res).await["todo"]["_id"].as_i64().unwrap()
}
