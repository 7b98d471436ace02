//! Sign In Use Case
//!
//! Authenticates a user by phone number and password and starts a session,
//! replacing any previous one.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::start_session;
use crate::domain::entity::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::token::TokenPair;
use crate::domain::value_object::{
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;

/// Sign in input
pub struct SignInInput {
    pub phone_number: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(
        user_repo: Arc<U>,
        sessions: Arc<S>,
        codec: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Malformed input is reported exactly like a wrong password
        let phone_number =
            PhoneNumber::new(&input.phone_number).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_phone(&phone_number).await?;

        let Some(user) = user else {
            // Same Argon2 cost as a real verification
            let _ = UserPassword::dummy().verify(&raw_password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = start_session(self.sessions.as_ref(), &self.codec, user.id).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput { user, tokens })
    }
}
