use error_common::CarelogError;
use thiserror::Error;

/// Rejected user input. Messages are shown to the operator verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Phone must contain only numbers")]
    InvalidPhone,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Pain level must be between {min} and {max}")]
    PainLevelOutOfRange { min: u8, max: u8 },

    #[error("Mood is required")]
    MoodRequired,

    #[error("Appetite status is required")]
    AppetiteRequired,

    #[error("{0} is required")]
    FieldRequired(&'static str),
}

impl From<ValidationIssue> for CarelogError {
    fn from(issue: ValidationIssue) -> Self {
        CarelogError::Validation(issue.to_string())
    }
}
