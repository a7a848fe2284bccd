//! Cryptographic primitives for the CareLog engine
//!
//! - [`FieldCipher`]: AES-256-CBC encryption of single string fields under a
//!   per-record [`FieldKey`]. Tokens are `hex(iv || ciphertext)` and carry their
//!   own IV, so decryption needs nothing but the key.
//! - [`PasswordHasher`]: salted one-way password hashing (Argon2id, with bcrypt
//!   as fallback and legacy scheme). Hashes are self-describing.
//!
//! # Example
//!
//! ```rust
//! use crypto::FieldCipher;
//!
//! let key = FieldCipher::generate_key();
//! let token = FieldCipher::encrypt_field(&key, "alice@x.com")?;
//! assert_eq!(FieldCipher::decrypt_field(&key, &token)?, "alice@x.com");
//! # Ok::<(), crypto::CryptoError>(())
//! ```

pub mod error;
pub mod field_cipher;
pub mod password;

pub use error::*;
pub use field_cipher::{FieldCipher, FieldKey, IV_LEN, KEY_LEN};
pub use password::{Argon2Params, HashScheme, HasherConfig, PasswordHasher, MIN_PASSWORD_LENGTH};
