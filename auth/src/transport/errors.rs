use std::path::PathBuf;

use thiserror::Error;

/// Startup failures while loading the transport key pair.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("RSA key not readable at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(String),

    #[error("RSA public key does not belong to the private key")]
    Mismatch,
}
