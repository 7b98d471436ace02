//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::start_session;
use crate::domain::entity::{NewUser, User};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::token::TokenPair;
use crate::domain::value_object::{
    email::Email,
    phone_number::PhoneNumber,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::TokenCodec;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub phone_number: String,
    /// Blank or absent means no email
    pub email: Option<String>,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate
        let name = UserName::new(&input.name)?;
        let phone_number = PhoneNumber::new(&input.phone_number)?;
        let email = Email::parse_optional(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        // Uniqueness among non-deleted users
        if self.user_repo.find_by_phone(&phone_number).await?.is_some() {
            return Err(AuthError::PhoneTaken);
        }
        if let Some(email) = &email {
            if self.user_repo.find_by_email(email).await?.is_some() {
                return Err(AuthError::EmailTaken);
            }
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // A concurrent sign-up with the same phone loses at the unique index
        let user = self
            .user_repo
            .create(NewUser {
                name,
                phone_number,
                email,
                password,
            })
            .await?;

        let tokens = start_session(self.sessions.as_ref(), &self.codec, user.id).await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SignUpOutput { user, tokens })
    }
}
