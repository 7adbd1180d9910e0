use std::sync::OnceLock;

use crate::error::AppError;
use crate::jwt::TokenSubject;
use crate::password::PasswordHasher;
use crate::tokens::TokenPair;
use crate::tokens::TokenService;

/// Stand-in compared against when the account does not exist, so both
/// sign-in failure paths do the same work.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalisation";

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: TokenService,
    dummy_hash: OnceLock<String>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher configured with the deployment's cost factor
    /// * `tokens` - Token service holding the access and refresh secrets
    pub fn new(password_hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            password_hasher,
            tokens,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Token service used for issuance and verification.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `Internal` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        Ok(self.password_hasher.hash(password)?)
    }

    /// Check a password against the stored hash of a possibly missing account.
    ///
    /// `stored_hash` is `None` when no account matched; the password is then
    /// checked against a dummy hash and the answer is always `false`. A
    /// stored hash that cannot be parsed is treated the same way, so callers
    /// see a plain mismatch for every failed check.
    ///
    /// # Errors
    /// * `Internal` - Hashing the dummy password failed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<bool, AppError> {
        if let Some(hash) = stored_hash {
            match self.password_hasher.verify(password, hash) {
                Ok(verified) => return Ok(verified),
                Err(e) => tracing::error!(error = %e, "Stored password hash is unreadable"),
            }
        }

        let dummy = self.dummy_hash()?;
        self.password_hasher.verify(password, dummy)?;
        Ok(false)
    }

    /// Issue a fresh access/refresh pair for the subject.
    ///
    /// # Errors
    /// * `Internal` - Token signing failed
    pub fn issue_tokens(&self, subject: &TokenSubject) -> Result<TokenPair, AppError> {
        self.tokens.issue_pair(subject)
    }

    fn dummy_hash(&self) -> Result<&str, AppError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash.as_str());
        }
        let hash = self.password_hasher.hash(DUMMY_PASSWORD)?;
        Ok(self.dummy_hash.get_or_init(|| hash).as_str())
    }
}
