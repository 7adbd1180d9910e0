use std::fmt;
use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::pkcs8::LineEnding;
use rsa::Oaep;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;
use sha2::Sha256;

use super::errors::KeyLoadError;
use crate::error::AppError;

/// RSA-OAEP (SHA-256) envelope protecting passwords between client and server.
///
/// Clients encrypt the password under the published public key and send it
/// base64-encoded; the private key never leaves the process.
#[derive(Clone)]
pub struct TransportGate {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    public_key_pem: String,
}

impl TransportGate {
    /// Build a gate around a private key, deriving the public half.
    ///
    /// # Errors
    /// * `InvalidPublicKey` - Derived public key cannot be PEM-encoded
    pub fn new(private_key: RsaPrivateKey) -> Result<Self, KeyLoadError> {
        let public_key = RsaPublicKey::from(&private_key);
        let public_key_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        Ok(Self {
            private_key,
            public_key,
            public_key_pem,
        })
    }

    /// Parse a PEM key pair (PKCS#1 or PKCS#8).
    ///
    /// # Errors
    /// * `InvalidPrivateKey` / `InvalidPublicKey` - PEM cannot be parsed
    /// * `Mismatch` - Public key is not the private key's public half
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, KeyLoadError> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(private_pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(private_pem))
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;

        let public_key = RsaPublicKey::from_pkcs1_pem(public_pem)
            .or_else(|_| RsaPublicKey::from_public_key_pem(public_pem))
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        if RsaPublicKey::from(&private_key) != public_key {
            return Err(KeyLoadError::Mismatch);
        }

        Self::new(private_key)
    }

    /// Read the key pair from PEM files.
    ///
    /// # Errors
    /// * `Unreadable` - A file is missing or cannot be read; names the path
    /// * any error of [`TransportGate::from_pem`]
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyLoadError> {
        let private_pem = read_key(private_key_path.as_ref())?;
        let public_pem = read_key(public_key_path.as_ref())?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Public key clients should encrypt with, as SPKI PEM.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Decrypt a base64 RSA-OAEP ciphertext into the plaintext password.
    ///
    /// # Errors
    /// * `Decryption` - Bad base64, wrong key, corrupted payload, padding
    ///   mismatch or non UTF-8 plaintext; the cause is not reported
    pub fn decrypt_password(&self, ciphertext: &str) -> Result<String, AppError> {
        let bytes = STANDARD.decode(ciphertext.trim()).map_err(|e| {
            tracing::debug!(error = %e, "Encrypted password is not valid base64");
            AppError::decryption()
        })?;

        let plaintext = self
            .private_key
            .decrypt(Oaep::new::<Sha256>(), &bytes)
            .map_err(|e| {
                tracing::debug!(error = %e, "Password decryption failed");
                AppError::decryption()
            })?;

        String::from_utf8(plaintext).map_err(|_| AppError::decryption())
    }

    /// Encrypt a password under the public key, base64-encoded.
    ///
    /// # Errors
    /// * `Encryption` - The key cannot encrypt this input (e.g. too long)
    pub fn encrypt_password(&self, plaintext: &str) -> Result<String, AppError> {
        self.public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext.as_bytes())
            .map(|ciphertext| STANDARD.encode(ciphertext))
            .map_err(|e| AppError::encryption(e.to_string()))
    }
}

impl fmt::Debug for TransportGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportGate")
            .field("public_key_pem", &self.public_key_pem)
            .finish_non_exhaustive()
    }
}

fn read_key(path: &Path) -> Result<String, KeyLoadError> {
    fs::read_to_string(path).map_err(|source| KeyLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
