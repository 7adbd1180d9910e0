//! Error taxonomy shared by every stage of the authentication pipeline.
//!
//! [`AppError`] is the only error type that crosses component boundaries.
//! Each variant belongs to exactly one [`ErrorKind`], which fixes its HTTP
//! status and machine code.

pub mod kind;
pub mod validation;

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub use kind::ErrorCode;
pub use kind::ErrorKind;
pub use validation::parse_validation_error;
pub use validation::FieldError;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const INVALID_AUTHENTICATION: &str = "Invalid authentication";
pub const TOKEN_EXPIRED: &str = "Token expired";

/// A classified failure.
///
/// Messages of [`AppError::Encryption`], [`AppError::DatabaseConnection`] and
/// [`AppError::Internal`] are operator diagnostics; clients only ever see
/// [`AppError::public_message`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    TokenExpired(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Email \"{0}\" already exists")]
    DuplicateEmail(String),

    #[error("{0}")]
    Decryption(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Database unavailable: {0}")]
    DatabaseConnection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(details: Vec<FieldError>) -> Self {
        AppError::Validation {
            message: ErrorKind::Validation.default_message().to_string(),
            details,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        AppError::Authentication(message.into())
    }

    /// Shared by every credential-check failure so callers cannot tell an
    /// unknown email from a wrong password.
    pub fn invalid_credentials() -> Self {
        AppError::Authentication(INVALID_CREDENTIALS.to_string())
    }

    pub fn invalid_token() -> Self {
        AppError::Authentication(INVALID_TOKEN.to_string())
    }

    pub fn token_expired() -> Self {
        AppError::TokenExpired(TOKEN_EXPIRED.to_string())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        AppError::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        AppError::DuplicateEmail(email.into())
    }

    pub fn decryption() -> Self {
        AppError::Decryption(ErrorKind::Decryption.default_message().to_string())
    }

    pub fn encryption(diagnostic: impl Into<String>) -> Self {
        AppError::Encryption(diagnostic.into())
    }

    pub fn database_connection(diagnostic: impl Into<String>) -> Self {
        AppError::DatabaseConnection(diagnostic.into())
    }

    pub fn internal(diagnostic: impl Into<String>) -> Self {
        AppError::Internal(diagnostic.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::Authentication(_) => ErrorKind::Authentication,
            AppError::TokenExpired(_) => ErrorKind::TokenExpired,
            AppError::Authorization(_) => ErrorKind::Authorization,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            AppError::Decryption(_) => ErrorKind::Decryption,
            AppError::Encryption(_) => ErrorKind::Encryption,
            AppError::DatabaseConnection(_) => ErrorKind::DatabaseConnection,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind().code()
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }

    /// Message safe to send to a client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Encryption(_) | AppError::DatabaseConnection(_) | AppError::Internal(_) => {
                self.kind().default_message().to_string()
            }
            other => other.to_string(),
        }
    }

    /// Structured details for the client, if the kind carries any.
    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation { details, .. } => serde_json::to_value(details).ok(),
            _ => None,
        }
    }
}
