use async_trait::async_trait;
use auth::AppError;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PublicId;
use crate::domain::user::models::User;
use crate::user::errors::UserRepositoryError;

/// Port for user lookup operations exposed to the inbound layer.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve the user behind an authenticated request.
    ///
    /// # Arguments
    /// * `public_id` - Public identifier taken from the access token
    ///
    /// # Returns
    /// User entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseConnection` - Store unreachable
    async fn get_user(&self, public_id: &PublicId) -> Result<User, AppError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user record in a single atomic write.
    ///
    /// # Arguments
    /// * `user` - Validated fields of the new record
    ///
    /// # Returns
    /// Stored user with its storage key and timestamps
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered; nothing was written
    /// * `Unavailable` - Store unreachable
    /// * `Database` - Any other storage failure
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable
    /// * `Database` - Any other storage failure
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, UserRepositoryError>;

    /// Retrieve user by public identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable
    /// * `Database` - Any other storage failure
    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<User>, UserRepositoryError>;
}
