// Semantic checks applied after the sources are merged
use crate::error::{ConfigError, Result};
use crate::settings::CarelogSettings;
use crypto::{password::BCRYPT_MAX_COST, password::BCRYPT_MIN_COST, MIN_PASSWORD_LENGTH};
use database_layer::collections;

pub fn validate(settings: &CarelogSettings) -> Result<()> {
    let mut problems = Vec::new();

    if settings.storage.data_file.as_os_str().is_empty() {
        problems.push("storage.data_file must not be empty".to_string());
    }

    let missing: Vec<&str> = collections::REQUIRED
        .iter()
        .copied()
        .filter(|required| !settings.storage.collections.iter().any(|c| c == required))
        .collect();
    if !missing.is_empty() {
        problems.push(format!(
            "storage.collections is missing required collections: {}",
            missing.join(", ")
        ));
    }

    if settings.security.min_password_length < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "security.min_password_length must be at least {MIN_PASSWORD_LENGTH}"
        ));
    }

    if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&settings.security.bcrypt_cost) {
        problems.push(format!(
            "security.bcrypt_cost must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}"
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(problems.join("; ")))
    }
}
