use http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

/// Stable machine-readable code sent to clients.
///
/// Every code maps to exactly one HTTP status; several kinds may share a code
/// when clients are not meant to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Unauthenticated,
    TokenExpired,
    Forbidden,
    NotFound,
    DuplicateEmail,
    InternalError,
    DatabaseConnectionError,
}

impl ErrorCode {
    /// HTTP status carried by every error with this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthenticated | ErrorCode::TokenExpired => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DuplicateEmail => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseConnectionError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Wire representation, e.g. `TOKEN_EXPIRED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseConnectionError => "DATABASE_CONNECTION_ERROR",
        }
    }
}

/// Closed set of failure kinds raised anywhere in the authentication pipeline.
///
/// This is the payload-free discriminant of [`AppError`](super::AppError) and
/// doubles as the registry used to document the error contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    TokenExpired,
    Authorization,
    NotFound,
    DuplicateEmail,
    Decryption,
    Encryption,
    DatabaseConnection,
    Internal,
}

impl ErrorKind {
    /// Every kind, in documentation order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::Validation,
        ErrorKind::Authentication,
        ErrorKind::TokenExpired,
        ErrorKind::Authorization,
        ErrorKind::NotFound,
        ErrorKind::DuplicateEmail,
        ErrorKind::Decryption,
        ErrorKind::Encryption,
        ErrorKind::DatabaseConnection,
        ErrorKind::Internal,
    ];

    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::Validation | ErrorKind::Decryption => ErrorCode::ValidationError,
            ErrorKind::Authentication => ErrorCode::Unauthenticated,
            ErrorKind::TokenExpired => ErrorCode::TokenExpired,
            ErrorKind::Authorization => ErrorCode::Forbidden,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::DuplicateEmail => ErrorCode::DuplicateEmail,
            ErrorKind::Encryption | ErrorKind::Internal => ErrorCode::InternalError,
            ErrorKind::DatabaseConnection => ErrorCode::DatabaseConnectionError,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code().status()
    }

    /// Name used in generated error documentation.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::TokenExpired => "TokenExpiredError",
            ErrorKind::Authorization => "AuthorizationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::DuplicateEmail => "DuplicateEmailError",
            ErrorKind::Decryption => "DecryptionError",
            ErrorKind::Encryption => "EncryptionError",
            ErrorKind::DatabaseConnection => "DatabaseConnectionError",
            ErrorKind::Internal => "InternalError",
        }
    }

    /// Message used when no more specific one is supplied.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation failed",
            ErrorKind::Authentication => "Authentication failed",
            ErrorKind::TokenExpired => "Token has expired",
            ErrorKind::Authorization => "Access denied",
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::DuplicateEmail => "Resource already exists",
            ErrorKind::Decryption => "Failed to decrypt password",
            ErrorKind::Encryption => "Failed to encrypt password",
            ErrorKind::DatabaseConnection => "Database service unavailable",
            ErrorKind::Internal => "Internal server error",
        }
    }
}
