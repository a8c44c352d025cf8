#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{HeaderMap, Request, StatusCode};
use leetcode_proxy::app::{AppState, build_router};
use leetcode_proxy::config::environment::AppConfig;
use leetcode_proxy::infra::init_infra;
use serde_json::Value;
use tower::util::ServiceExt;

/// Nothing listens here; connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn test_config(upstream: &str) -> AppConfig {
    AppConfig {
        rust_env: "test".to_string(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        leetcode_base_url: upstream.to_string(),
        leetcode_graphql_url: format!("{upstream}/graphql"),
        leetcode_cookie: None,
        leetcode_csrf_token: None,
        leetcode_user_agent: Some("leetcode-proxy-tests".to_string()),
        leetcode_origin: Some(upstream.to_string()),
        leetcode_referer: None,
        upstream_timeout_seconds: 5,
        poll_interval_ms: 5,
        poll_max_attempts: 3,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

pub fn app_with(config: AppConfig) -> Router {
    let infra = init_infra(&config).expect("http client");
    build_router(AppState::new(config, infra))
}

pub fn app(upstream: &str) -> Router {
    app_with(test_config(upstream))
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, headers, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}
