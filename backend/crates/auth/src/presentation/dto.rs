//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::User;
use crate::domain::token::TokenPair;

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// Sign in request
#[derive(Clone, Deserialize)]
pub struct SignInRequest {
    pub phone_number: String,
    pub password: String,
}

/// Refresh request
#[derive(Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.to_string(),
            phone_number: user.phone_number.to_string(),
            email: user.email.as_ref().map(|e| e.to_string()),
            photo_url: user.photo_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Sign up / sign in response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokenPair,
}
