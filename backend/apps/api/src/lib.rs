//! API application
//!
//! Assembles the auth and profile routers behind the auth gate. `main`
//! wires in the real Postgres, Redis and object storage clients; tests use
//! the in-memory ones.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use auth::config::AuthConfig;
use auth::domain::repository::{SessionStore, UserRepository};
use auth::handlers::AuthAppState;
use auth::middleware::auth_gate;
use auth::{auth_router, session_router};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use chrono::Utc;
use profile::domain::blob_store::BlobStore;
use profile::{ProfileAppState, profile_router};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Per-request deadline
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the routed application with the auth gate applied
pub fn build_app<U, S, B>(
    users: Arc<U>,
    sessions: Arc<S>,
    blobs: Arc<B>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(users.clone(), sessions.clone(), auth_config);
    let gate = auth_state.gate_state();
    let profile_state = ProfileAppState::new(users, sessions, blobs);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/auth", auth_router(auth_state.clone()))
        .nest(
            "/api/v1/profile",
            profile_router(profile_state).merge(session_router(auth_state)),
        )
        .layer(middleware::from_fn_with_state(gate, auth_gate::<S>))
}

/// Tracing, timeout and CORS around the application
pub fn with_http_layers(app: Router, frontend_origins: &[String]) -> Router {
    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        REQUEST_TIMEOUT,
    ))
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer(frontend_origins))
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let methods = AllowMethods::list([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]);
    let headers = AllowHeaders::list([
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
    ]);

    // Credentials cannot be combined with a wildcard origin
    if frontend_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().timestamp(),
    })
}
