use error_common::CarelogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid encrypted data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid UTF-8 in decrypted data: {0}")]
    InvalidUtf8(String),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;

impl From<CryptoError> for CarelogError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::WeakPassword { .. } => CarelogError::Validation(err.to_string()),
            CryptoError::Configuration(msg) => CarelogError::Configuration(msg),
            CryptoError::HashingFailed(msg) => {
                CarelogError::Internal(anyhow::anyhow!("password hashing failed: {msg}"))
            }
            CryptoError::DecryptionFailed(_)
            | CryptoError::InvalidKeyLength { .. }
            | CryptoError::InvalidHex(_)
            | CryptoError::InvalidFormat(_)
            | CryptoError::InvalidUtf8(_) => CarelogError::Decryption(err.to_string()),
        }
    }
}

