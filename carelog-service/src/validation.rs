// Input rules applied before anything is encrypted or stored
use crate::error::ValidationIssue;
use care_records::{MAX_PAIN_LEVEL, MIN_PAIN_LEVEL};

/// Check registration input, reporting the first rule it breaks.
///
/// Rules, in order: every field present, email contains `@` and `.`,
/// password at least `min_password_length` characters, phone all digits.
pub fn validate_registration(
    name: &str,
    email: &str,
    phone: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), ValidationIssue> {
    if [name, email, phone, password].iter().any(|field| field.is_empty()) {
        return Err(ValidationIssue::MissingFields);
    }
    validate_email(email)?;
    if password.chars().count() < min_password_length {
        return Err(ValidationIssue::PasswordTooShort {
            min: min_password_length,
        });
    }
    validate_phone(phone)
}

pub fn validate_email(email: &str) -> Result<(), ValidationIssue> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationIssue::InvalidEmail)
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationIssue> {
    if !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationIssue::InvalidPhone)
    }
}

/// Check wellbeing input and narrow the pain level to its stored range
pub fn validate_wellbeing(pain_level: i64, mood: &str, appetite: &str) -> Result<u8, ValidationIssue> {
    let out_of_range = ValidationIssue::PainLevelOutOfRange {
        min: MIN_PAIN_LEVEL,
        max: MAX_PAIN_LEVEL,
    };
    let level = u8::try_from(pain_level).map_err(|_| out_of_range.clone())?;
    if !(MIN_PAIN_LEVEL..=MAX_PAIN_LEVEL).contains(&level) {
        return Err(out_of_range);
    }
    if mood.trim().is_empty() {
        return Err(ValidationIssue::MoodRequired);
    }
    if appetite.trim().is_empty() {
        return Err(ValidationIssue::AppetiteRequired);
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_rules_in_order() {
        assert_eq!(
            validate_registration("", "a@b.com", "123", "secret1", 6),
            Err(ValidationIssue::MissingFields)
        );
        assert_eq!(
            validate_registration("N", "bad-email", "123", "secret1", 6),
            Err(ValidationIssue::InvalidEmail)
        );
        assert_eq!(
            validate_registration("N", "a@b.com", "123", "short", 6),
            Err(ValidationIssue::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            validate_registration("N", "a@b.com", "12a3", "secret1", 6),
            Err(ValidationIssue::InvalidPhone)
        );
        assert_eq!(validate_registration("N", "a@b.com", "123", "secret1", 6), Ok(()));
    }

    #[test]
    fn test_first_broken_rule_wins() {
        // Bad email and bad phone: email is reported
        assert_eq!(
            validate_registration("N", "nope", "abc", "secret1", 6),
            Err(ValidationIssue::InvalidEmail)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationIssue::MissingFields.to_string(), "All fields are required");
        assert_eq!(
            ValidationIssue::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            ValidationIssue::PainLevelOutOfRange { min: 1, max: 10 }.to_string(),
            "Pain level must be between 1 and 10"
        );
    }

    #[test]
    fn test_wellbeing_rules() {
        assert_eq!(validate_wellbeing(5, "Calm", "Good"), Ok(5));
        assert_eq!(validate_wellbeing(1, "Calm", "Good"), Ok(1));
        assert_eq!(validate_wellbeing(10, "Calm", "Good"), Ok(10));
        for level in [0, 11, -3, 300] {
            assert!(matches!(
                validate_wellbeing(level, "Calm", "Good"),
                Err(ValidationIssue::PainLevelOutOfRange { .. })
            ));
        }
        assert_eq!(validate_wellbeing(5, "", "Good"), Err(ValidationIssue::MoodRequired));
        assert_eq!(validate_wellbeing(5, "Calm", " "), Err(ValidationIssue::AppetiteRequired));
    }
}
