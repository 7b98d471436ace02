//! Get Profile Use Case

use std::sync::Arc;

use auth::domain::entity::User;
use auth::domain::repository::UserRepository;
use auth::domain::value_object::user_id::UserId;

use crate::error::ProfileResult;

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> ProfileResult<User> {
        Ok(self.user_repo.get_by_id(user_id).await?)
    }
}
