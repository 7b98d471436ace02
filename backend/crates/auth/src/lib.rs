//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, tokens, repository traits
//! - `application/` - Use cases
//! - `infra/` - JWT codec, PostgreSQL and Redis implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate
//!
//! ## Features
//! - Sign up / sign in by phone number and password
//! - Stateless access tokens, rotating refresh tokens
//! - One active session per user, kept in Redis
//! - Logout blacklists the access token until it expires
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Access and refresh tokens signed with independent HS256 secrets
//! - Every token or session failure looks the same to clients

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{PgUserRepository, RedisSessionStore, TokenCodec};
pub use presentation::router::{auth_router, session_router};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::token::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    pub use crate::infra::memory::{InMemorySessionStore, InMemoryUserRepository};
}
