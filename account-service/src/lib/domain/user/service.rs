use std::sync::Arc;

use async_trait::async_trait;
use auth::AppError;

use crate::domain::user::models::PublicId;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user lookups.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, public_id: &PublicId) -> Result<User, AppError> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
