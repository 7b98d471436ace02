//! Update Profile Use Case
//!
//! Changes the name and/or email of the caller. Absent or blank fields keep
//! their current value.

use std::sync::Arc;

use auth::domain::entity::User;
use auth::domain::repository::UserRepository;
use auth::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use auth::AuthError;

use crate::error::{ProfileError, ProfileResult};

/// Update profile input
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId, input: UpdateProfileInput) -> ProfileResult<User> {
        let mut user = self.user_repo.get_by_id(user_id).await?;

        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .map(UserName::new)
            .transpose()
            .map_err(AuthError::from)?;
        let email = Email::parse_optional(input.email).map_err(AuthError::from)?;

        if let Some(email) = email {
            if user.email.as_ref() != Some(&email) {
                if self.user_repo.email_taken_by_other(&email, user_id).await? {
                    return Err(ProfileError::EmailTaken);
                }
                user.set_email(email);
            }
        }
        if let Some(name) = name {
            user.set_name(name);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }
}
