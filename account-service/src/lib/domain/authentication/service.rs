use std::sync::Arc;

use async_trait::async_trait;
use auth::AppError;
use auth::Authenticator;
use auth::TokenPair;

use crate::authentication::models::AuthSession;
use crate::authentication::models::SignInCommand;
use crate::authentication::models::SignUpCommand;
use crate::authentication::ports::AuthServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PublicId;
use crate::user::ports::UserRepository;

/// Domain service implementation of the authentication workflow.
///
/// Holds no per-session state; every call is one request's worth of work
/// over the shared, read-only authenticator.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<AuthSession, AppError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let new_user = NewUser {
            public_id: PublicId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            avatar_url: command.avatar_url,
        };

        let user = self.repository.insert(new_user).await?;
        let tokens = self.authenticator.issue_tokens(&user.token_subject())?;

        tracing::info!(user_id = %user.public_id, "User registered");

        Ok(AuthSession { user, tokens })
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<AuthSession, AppError> {
        let user = self.repository.find_by_email(&command.email).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
        let verified = self
            .authenticator
            .verify_password(&command.password, stored_hash)?;

        match user {
            Some(user) if verified => {
                let tokens = self.authenticator.issue_tokens(&user.token_subject())?;
                tracing::info!(user_id = %user.public_id, "User signed in");
                Ok(AuthSession { user, tokens })
            }
            _ => {
                tracing::warn!("Sign-in rejected");
                Err(AppError::invalid_credentials())
            }
        }
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .authenticator
            .tokens()
            .verify_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::warn!(reason = e.kind().name(), "Refresh token rejected");
                AppError::invalid_token()
            })?;

        let public_id =
            PublicId::from_string(claims.id()).map_err(|_| AppError::invalid_token())?;

        let user = self
            .repository
            .find_by_public_id(&public_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %public_id, "Refresh token for unknown user");
                AppError::invalid_token()
            })?;

        self.authenticator.issue_tokens(&user.token_subject())
    }

    async fn logout(&self, public_id: &PublicId) -> Result<(), AppError> {
        // No revocation store: tokens already issued stay valid until expiry.
        tracing::info!(user_id = %public_id, "User logged out");
        Ok(())
    }
}
