use crypto::CryptoError;
use error_common::CarelogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Stored record is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl RecordError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub type RecordResult<T> = Result<T, RecordError>;

impl From<RecordError> for CarelogError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Crypto(inner) => inner.into(),
            RecordError::MissingField(_)
            | RecordError::InvalidField { .. }
            | RecordError::NotAnObject => CarelogError::Validation(err.to_string()),
        }
    }
}
