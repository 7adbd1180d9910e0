use thiserror::Error;

use crate::error::AppError;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::internal(err.to_string())
    }
}
