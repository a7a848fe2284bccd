use crate::error::{CryptoError, CryptoResult};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier,
};
use serde::{Deserialize, Serialize};

/// Shortest password accepted for hashing
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// bcrypt work factor bounds
pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;

/// Hash scheme written into new password hashes.
///
/// Both schemes are self-describing (PHC string for Argon2, `$2b$` modular
/// crypt for bcrypt), so a store holding a mix of the two verifies without
/// migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Argon2id,
    Bcrypt,
}

impl HashScheme {
    /// Identify the scheme of a stored hash from its prefix
    pub fn detect(stored_hash: &str) -> Option<Self> {
        if stored_hash.starts_with("$argon2") {
            Some(Self::Argon2id)
        } else if ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| stored_hash.starts_with(prefix))
        {
            Some(Self::Bcrypt)
        } else {
            None
        }
    }
}

/// Argon2 parameters for password hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Params {
    /// Memory cost in KiB (minimum 19456 for Argon2id)
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    pub scheme: HashScheme,
    pub argon2: Argon2Params,
    pub bcrypt_cost: u32,
    pub min_password_length: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            scheme: HashScheme::Argon2id,
            argon2: Argon2Params::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

/// One-way salted password hashing, independent of field encryption.
#[derive(Clone)]
pub struct PasswordHasher {
    config: HasherConfig,
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(config: HasherConfig) -> CryptoResult<Self> {
        if config.min_password_length < MIN_PASSWORD_LENGTH {
            return Err(CryptoError::Configuration(format!(
                "min_password_length must be at least {MIN_PASSWORD_LENGTH}"
            )));
        }
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&config.bcrypt_cost) {
            return Err(CryptoError::Configuration(format!(
                "bcrypt_cost must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}"
            )));
        }

        let params = argon2::Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            None,
        )
        .map_err(|e| CryptoError::Configuration(format!("invalid Argon2 parameters: {e}")))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

        Ok(Self { config, argon2 })
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    pub fn min_password_length(&self) -> usize {
        self.config.min_password_length
    }

    /// Hash a password with the configured scheme.
    ///
    /// Argon2id is preferred; if it fails at runtime the password is hashed with
    /// bcrypt instead, which stays verifiable because the scheme is embedded in
    /// the returned string.
    pub fn hash(&self, password: &str) -> CryptoResult<String> {
        if password.chars().count() < self.config.min_password_length {
            return Err(CryptoError::WeakPassword {
                min: self.config.min_password_length,
            });
        }

        match self.config.scheme {
            HashScheme::Argon2id => self.hash_argon2(password).or_else(|e| {
                tracing::warn!(error = %e, "Argon2 hashing failed, falling back to bcrypt");
                self.hash_bcrypt(password)
            }),
            HashScheme::Bcrypt => self.hash_bcrypt(password),
        }
    }

    /// Verify a password against a stored hash of either scheme.
    ///
    /// Malformed or unrecognised hashes verify as `false`.
    pub fn verify(stored_hash: &str, password: &str) -> bool {
        match HashScheme::detect(stored_hash) {
            Some(HashScheme::Argon2id) => match PasswordHash::new(stored_hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    tracing::debug!(error = %e, "Stored Argon2 hash is malformed");
                    false
                }
            },
            Some(HashScheme::Bcrypt) => bcrypt::verify(password, stored_hash).unwrap_or(false),
            None => false,
        }
    }

    fn hash_argon2(&self, password: &str) -> CryptoResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CryptoError::HashingFailed(e.to_string()))
    }

    fn hash_bcrypt(&self, password: &str) -> CryptoResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| CryptoError::HashingFailed(e.to_string()))
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
