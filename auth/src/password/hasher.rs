use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted one-way hashing (Argon2id) with a configurable cost factor.
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the default cost factor.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with an explicit cost factor.
    ///
    /// # Arguments
    /// * `cost` - Number of Argon2 passes over memory; higher is slower
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range Argon2 accepts
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self { params })
    }

    /// Configured cost factor.
    pub fn cost(&self) -> u32 {
        self.params.t_cost()
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is drawn for every call, so hashing the same
    /// password twice yields different strings.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters are read from the stored hash, so hashes produced under an
    /// older cost factor still verify.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
