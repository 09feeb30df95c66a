#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::SET_COOKIE;
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::providers::{Format, Yaml};
use figment::Figment;
use serde_json::Value;
use sessiontron::config::{config_from_figment, ConfigV1};
use sessiontron::routes::create_router;
use sessiontron::state::AppState;

pub const SESSION_SECRET: &str = "test-session-secret";

/// A memory store holding one user record with id "42".
pub const MEMORY_STORE: &str = r#"
  type: memory
  users:
    - id: "42"
      name: Stored Name
      email: stored@example.com
      image: https://cdn.example.com/42.png
"#;

/// Builds a validated config whose Google endpoints point at `google_base`.
pub fn test_config(google_base: &str, store_yaml: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
logging:
  level: debug
  format: console
store:{store}
oauth:
  google:
    client_id: google-id
    client_secret: google-secret
    redirect_uri: http://localhost:8081/api/auth/callback/google
    auth_url: {base}/o/oauth2/v2/auth
    token_url: {base}/token
    userinfo_url: {base}/userinfo
session:
  secret: {secret}
  max_age: 3600
"#,
        store = store_yaml,
        base = google_base,
        secret = SESSION_SECRET,
    );
    config_from_figment(Figment::new().merge(Yaml::string(&yaml)))
        .expect("test config should be valid")
}

/// Upstash store section pointing at a mock server.
pub fn upstash_store(url: &str) -> String {
    format!(
        r#"
  type: upstash
  url: {}
  token: kv-token
"#,
        url
    )
}

pub fn build_app(config: ConfigV1) -> (Router, Arc<ConfigV1>) {
    let config = Arc::new(config);
    let state = AppState::new(config.clone());
    (create_router(state), config)
}

pub fn request(path: &str, method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn request_with_bearer(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn request_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Cookie", cookie)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Value of the `name` cookie set by a response, if any.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .map(|value| {
            value[prefix.len()..]
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string()
        })
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .expect("response should redirect")
        .to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
