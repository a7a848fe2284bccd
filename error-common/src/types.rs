use crate::codes;
use thiserror::Error;

/// Error kinds surfaced by every CareLog operation.
///
/// Crate-local errors (`CryptoError`, `StorageError`, `RecordError`, ...) are
/// folded into one of these variants at the service boundary. "Not found" is
/// never an error: lookups return `Option` or an empty `Vec` instead.
#[derive(Error, Debug)]
pub enum CarelogError {
    /// Bad or missing input. Nothing was persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ciphertext is corrupt or was produced under a different key.
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// The backing document could not be read, parsed, or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings failed to load or validate.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wrapped external errors
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CarelogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Stable error code for operator-facing output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => codes::validation::INVALID_INPUT,
            Self::Decryption(_) => codes::crypto::DECRYPTION_FAILED,
            Self::Storage(_) => codes::storage::STORAGE_FAILED,
            Self::Configuration(_) => codes::configuration::INVALID_CONFIGURATION,
            Self::Internal(_) => codes::system::INTERNAL,
        }
    }

    /// Validation failures are recoverable: the caller may retry with new input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for CareLog operations
pub type Result<T> = std::result::Result<T, CarelogError>;

/// Log an error with its code before it is handed back to the caller.
pub fn log_error(context: &str, error: &CarelogError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "CareLog operation failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_kind() {
        assert_eq!(
            CarelogError::validation("name is required").code(),
            "VALIDATION_1001"
        );
        assert_eq!(
            CarelogError::Decryption("bad padding".into()).code(),
            "CRYPTO_2001"
        );
        assert_eq!(CarelogError::storage("disk full").code(), "STORAGE_4001");
    }

    #[test]
    fn test_only_validation_is_recoverable() {
        assert!(CarelogError::validation("x").is_recoverable());
        assert!(!CarelogError::storage("x").is_recoverable());
        assert!(!CarelogError::Internal(anyhow::anyhow!("boom")).is_recoverable());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = CarelogError::validation("Invalid email format");
        assert_eq!(err.to_string(), "Validation error: Invalid email format");
    }
}
