//! Full request flow through the assembled router, backed by in-memory
//! stores.

use std::sync::Arc;

use api::{build_app, with_http_layers};
use auth::config::AuthConfig;
use auth::testing::{InMemorySessionStore, InMemoryUserRepository};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use profile::testing::InMemoryBlobStore;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let app = build_app(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryBlobStore::new()),
        Arc::new(AuthConfig::with_random_secrets()),
    );
    with_http_layers(app, &["*".to_string()])
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn tokens(body: &Value) -> (String, String) {
    let tokens = &body["data"]["tokens"];
    (
        tokens["access_token"].as_str().unwrap().to_string(),
        tokens["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = app();
    let credentials = json!({"phone_number": "+15550001111", "password": "secret1"});

    // Sign up
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Test User",
            "phone_number": "+15550001111",
            "password": "secret1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "registration successful");
    assert_eq!(body["data"]["user"]["phone_number"], "+15550001111");
    let (_, signup_refresh) = tokens(&body);

    // Duplicate phone
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Other User",
            "phone_number": "+15550001111",
            "password": "another1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Sign in replaces the session
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signin",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "login successful");
    let (access, refresh) = tokens(&body);
    assert_ne!(refresh, signup_refresh);

    // The refresh token from sign-up is stale now
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": signup_refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid or expired token");

    // Protected route with the current access token
    let (status, body) = send(&app, Method::GET, "/api/v1/profile", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Test User");

    // Rotate
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "tokens refreshed");
    let rotated_refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    // Logout
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/profile/logout",
        Some(&access),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged out successfully");

    // Access token is blacklisted, session is gone
    let (status, _) = send(&app, Method::GET, "/api/v1/profile", Some(&access), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": rotated_refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_failures_look_the_same() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Test User",
            "phone_number": "+15550001111",
            "password": "secret1",
        })),
    )
    .await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signin",
        None,
        Some(json!({"phone_number": "+15550001111", "password": "wrong-pass"})),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signin",
        None,
        Some(json!({"phone_number": "+15559998888", "password": "secret1"})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_deleted_profile_cannot_sign_in() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Test User",
            "phone_number": "+15550001111",
            "password": "secret1",
        })),
    )
    .await;
    let (access, refresh) = tokens(&body);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/profile", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signin",
        None,
        Some(json!({"phone_number": "+15550001111", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The phone number is free again
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "New Owner",
            "phone_number": "+15550001111",
            "password": "secret2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_cors_preflight_passes_the_gate() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/profile")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
