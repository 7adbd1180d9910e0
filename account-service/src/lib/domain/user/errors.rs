use auth::AppError;
use thiserror::Error;

/// Error for PublicId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublicIdError {
    #[error("Public identifier cannot be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Valid email address is required")]
    InvalidFormat,
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for AvatarUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AvatarUrlError {
    #[error("Avatar URL too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Avatar URL must be an absolute URI")]
    InvalidFormat,
}

/// Failures reported by the user-record store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserRepositoryError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User store unreachable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<UserRepositoryError> for AppError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => AppError::duplicate_email(email),
            UserRepositoryError::Unavailable(msg) => AppError::database_connection(msg),
            UserRepositoryError::Database(msg) => AppError::internal(msg),
        }
    }
}
