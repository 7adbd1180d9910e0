//! Access/refresh token issuance and verification.
//!
//! Access and refresh tokens are signed with two independent secrets, so a
//! token of one class never verifies as the other.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::error::AppError;
use crate::error::INVALID_AUTHENTICATION;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSubject;

pub const TOKEN_ISSUER: &str = "social-app";
pub const TOKEN_AUDIENCE: &str = "social-users";

/// Access token lifetime in seconds (15 minutes).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Refresh token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

const BEARER_PREFIX: &str = "Bearer ";

/// Freshly issued access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies the two token classes.
pub struct TokenService {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenService {
    /// Create a token service from the two signing secrets.
    ///
    /// The secrets must be independent values; neither may be derived from
    /// the other.
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: JwtHandler::new(access_secret, TOKEN_ISSUER, TOKEN_AUDIENCE),
            refresh: JwtHandler::new(refresh_secret, TOKEN_ISSUER, TOKEN_AUDIENCE),
        }
    }

    pub fn issue_access_token(&self, subject: &TokenSubject) -> Result<String, AppError> {
        self.issue_access_token_at(subject, Utc::now())
    }

    pub fn issue_refresh_token(&self, subject: &TokenSubject) -> Result<String, AppError> {
        self.issue_refresh_token_at(subject, Utc::now())
    }

    /// Issue an access token as if the clock read `issued_at`.
    pub fn issue_access_token_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims::for_subject(
            subject.clone(),
            issued_at,
            Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            TOKEN_ISSUER,
            TOKEN_AUDIENCE,
        );
        sign(&self.access, &claims)
    }

    /// Issue a refresh token as if the clock read `issued_at`.
    pub fn issue_refresh_token_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims::for_subject(
            subject.clone(),
            issued_at,
            Duration::seconds(REFRESH_TOKEN_TTL_SECS),
            TOKEN_ISSUER,
            TOKEN_AUDIENCE,
        );
        sign(&self.refresh, &claims)
    }

    /// Issue a new access token and a new refresh token for the subject.
    pub fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject)?,
            refresh_token: self.issue_refresh_token(subject)?,
        })
    }

    /// Verify an access token.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature is valid but the token is past expiry
    /// * `Authentication` - Any other verification failure
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        verify(&self.access, token)
    }

    /// Verify a refresh token.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature is valid but the token is past expiry
    /// * `Authentication` - Any other verification failure
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        verify(&self.refresh, token)
    }
}

fn sign(handler: &JwtHandler, claims: &Claims) -> Result<String, AppError> {
    handler
        .encode(claims)
        .map_err(|e| AppError::internal(e.to_string()))
}

fn verify(handler: &JwtHandler, token: &str) -> Result<Claims, AppError> {
    handler.decode::<Claims>(token).map_err(|e| match e {
        JwtError::TokenExpired => AppError::token_expired(),
        other => {
            tracing::debug!(error = %other, "Token verification failed");
            AppError::authentication(INVALID_AUTHENTICATION)
        }
    })
}

/// Extract the token from an `Authorization` header value.
///
/// The header must read exactly `Bearer <token>`; the token part is trimmed
/// and must not be empty.
///
/// # Errors
/// * `Authentication` - Header absent, wrong scheme, or empty token
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::authentication(INVALID_AUTHENTICATION))
}
