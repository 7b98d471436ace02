//! Delete Profile Use Case
//!
//! Soft-deletes the caller and ends their session. The access token of the
//! request stays valid until it expires, but the gate-protected profile
//! routes report the user as gone.

use std::sync::Arc;

use auth::domain::repository::{SessionStore, UserRepository};
use auth::domain::value_object::user_id::UserId;

use crate::error::ProfileResult;

pub struct DeleteProfileUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
}

impl<U, S> DeleteProfileUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<S>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    pub async fn execute(&self, user_id: UserId) -> ProfileResult<()> {
        self.user_repo.soft_delete(user_id).await?;
        self.sessions.delete_refresh_token(user_id).await?;

        tracing::info!(user_id = %user_id, "Profile deleted");
        Ok(())
    }
}
