//! Authentication core library
//!
//! Provides the security-sensitive building blocks of the account service:
//! - Error taxonomy shared by every stage ([`AppError`])
//! - RSA-OAEP password transport ([`TransportGate`])
//! - Password hashing (Argon2id)
//! - Access/refresh token issuance and verification ([`TokenService`])
//! - Credential verification coordination ([`Authenticator`])
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenService, TokenSubject};
//!
//! let tokens = TokenService::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//! let subject = TokenSubject::new("g0oyq6r0dcxj85060ojvzxot", "kd14@yopmail.com");
//! let pair = tokens.issue_pair(&subject).unwrap();
//! let claims = tokens.verify_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.subject, subject);
//!
//! // A refresh token never passes as an access token
//! assert!(tokens.verify_access_token(&pair.refresh_token).is_err());
//! ```
//!
//! ## Bearer Header
//! ```
//! use auth::extract_bearer_token;
//!
//! assert_eq!(extract_bearer_token(Some("Bearer abc")).unwrap(), "abc");
//! assert!(extract_bearer_token(Some("Token abc")).is_err());
//! ```

pub mod authenticator;
pub mod error;
pub mod jwt;
pub mod password;
pub mod tokens;
pub mod transport;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use error::parse_validation_error;
pub use error::AppError;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use error::FieldError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSubject;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::extract_bearer_token;
pub use tokens::TokenPair;
pub use tokens::TokenService;
pub use transport::KeyLoadError;
pub use transport::TransportGate;
