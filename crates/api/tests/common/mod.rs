#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use prepvault_api::auth::jwt::{generate_access_token, JwtConfig, DEFAULT_ACCESS_EXPIRY_MINS};
use prepvault_api::config::{ServerConfig, DEFAULT_PASSWORD_MIN_LENGTH};
use prepvault_api::router::build_app_router;
use prepvault_api::state::AppState;
use prepvault_core::types::DbId;
use prepvault_notes::{NotesClient, NotesConfig};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "prepvault-integration-test-secret";

/// Note-generation settings that point at a port nothing listens on, so
/// any upstream call fails at connect time.
pub fn unreachable_notes_config(api_key: Option<&str>) -> NotesConfig {
    NotesConfig {
        api_key: api_key.map(str::to_string),
        model: "bigcode/starcoder".into(),
        fallback_model: None,
        router_url: "http://127.0.0.1:1/models".into(),
        legacy_url: "http://127.0.0.1:1/legacy".into(),
        timeout_secs: 5,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: DEFAULT_ACCESS_EXPIRY_MINS,
        },
        notes: unreachable_notes_config(Some("hf_test_token")),
    }
}

/// Build the full application router over `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the full application router with a custom configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let notes = NotesClient::new(config.notes.clone()).expect("client should build");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notes: Arc::new(notes),
    };
    build_app_router(state, &config)
}

/// Mint a valid access token for `user_id` without going through login.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Register a user through the API and return `(user_id, access_token)`.
pub async fn register_and_login(app: &Router, email: &str) -> (DbId, String) {
    let password = "correct-horse-battery";
    let body = serde_json::json!({ "email": email, "password": password, "name": "Test User" });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), 201, "registration should succeed");

    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed");
    let json = body_json(response).await;

    let user_id = json["user"]["id"].as_i64().expect("user id");
    let token = json["access_token"].as_str().expect("token").to_string();
    (user_id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
