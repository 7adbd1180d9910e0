use async_trait::async_trait;
use auth::AppError;
use auth::TokenPair;

use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::user::models::PublicId;

/// Port for the authentication workflow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered; nothing was written
    /// * `DatabaseConnection` - Store unreachable
    /// * `Internal` - Hashing, signing or storage failure
    async fn sign_up(&self, command: SignUpCommand) -> Result<AuthSession, AppError>;

    /// Open a session for existing credentials.
    ///
    /// # Errors
    /// * `Authentication` - Unknown email or wrong password, indistinguishably
    /// * `DatabaseConnection` - Store unreachable
    async fn sign_in(&self, command: SignInCommand) -> Result<AuthSession, AppError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// Both tokens are rotated. The presented refresh token stays valid until
    /// its own expiry.
    ///
    /// # Errors
    /// * `Authentication` - "Invalid token" for any verification failure or
    ///   when the user no longer exists
    /// * `DatabaseConnection` - Store unreachable during the re-lookup
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AppError>;

    /// End a session.
    ///
    /// Stateless: no token is revoked server-side. The caller discards the
    /// refresh token cookie; issued tokens remain valid until they expire.
    async fn logout(&self, public_id: &PublicId) -> Result<(), AppError>;
}
