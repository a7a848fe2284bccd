use crate::error::{CryptoError, CryptoResult};
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// CBC initialisation vector length (one AES block)
pub const IV_LEN: usize = 16;

const BLOCK_LEN: usize = 16;

/// Per-record AES-256 key - automatically zeroized on drop.
///
/// Equality is constant-time over the key bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FieldKey([u8; KEY_LEN]);

impl FieldKey {
    /// Generate a new random key (cryptographically secure)
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a key persisted as lowercase hex
    pub fn from_hex(encoded: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(encoded).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let key: [u8; KEY_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                got: bytes.len(),
            })?;
        Ok(Self(key))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for FieldKey {}

impl fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldKey([REDACTED])")
    }
}

/// AES-256-CBC encryption of single string fields.
///
/// Every token is self-contained: `hex(iv || ciphertext)`, where the ciphertext
/// is the PKCS#7-padded UTF-8 plaintext. Decryption only needs the key; the IV
/// always comes from the token prefix. A fresh IV is drawn per call, so the same
/// plaintext never encrypts to the same token twice and tokens must not be
/// compared as a stand-in for plaintext equality.
pub struct FieldCipher;

impl FieldCipher {
    pub fn generate_key() -> FieldKey {
        FieldKey::generate()
    }

    pub fn generate_iv() -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        iv
    }

    /// Encrypt `value` under `key` with a freshly generated IV
    pub fn encrypt_field(key: &FieldKey, value: &str) -> CryptoResult<String> {
        Self::encrypt_field_with_iv(key, &Self::generate_iv(), value)
    }

    /// Encrypt `value` under `key` with a caller-chosen IV.
    ///
    /// Callers must never reuse an IV across fields; this exists so a record
    /// can remember which IV it drew last.
    pub fn encrypt_field_with_iv(
        key: &FieldKey,
        iv: &[u8; IV_LEN],
        value: &str,
    ) -> CryptoResult<String> {
        let encryptor = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv).map_err(|_| {
            CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                got: key.as_bytes().len(),
            }
        })?;
        let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(value.as_bytes());

        let mut token = Vec::with_capacity(IV_LEN + ciphertext.len());
        token.extend_from_slice(iv);
        token.extend_from_slice(&ciphertext);
        Ok(hex::encode(token))
    }

    /// Decrypt a token produced by [`FieldCipher::encrypt_field`]
    pub fn decrypt_field(key: &FieldKey, token: &str) -> CryptoResult<String> {
        let data = hex::decode(token).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        if data.len() < IV_LEN + BLOCK_LEN || (data.len() - IV_LEN) % BLOCK_LEN != 0 {
            return Err(CryptoError::InvalidFormat(format!(
                "token is {} bytes, expected a 16-byte IV followed by whole 16-byte blocks",
                data.len()
            )));
        }
        let (iv, ciphertext) = data.split_at(IV_LEN);

        let decryptor = Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| {
            CryptoError::InvalidFormat("initialisation vector has the wrong length".to_string())
        })?;
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                CryptoError::DecryptionFailed("invalid padding (wrong key or corrupted token)".to_string())
            })?;

        String::from_utf8(plaintext).map_err(|e| CryptoError::InvalidUtf8(e.to_string()))
    }

    /// IV embedded at the front of a token
    pub fn token_iv(token: &str) -> CryptoResult<[u8; IV_LEN]> {
        let prefix = token
            .get(..IV_LEN * 2)
            .ok_or_else(|| CryptoError::InvalidFormat("token shorter than its IV".to_string()))?;
        let bytes = hex::decode(prefix).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidFormat("token shorter than its IV".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = FieldCipher::generate_key();

        let token = FieldCipher::encrypt_field(&key, "Alice").unwrap();
        assert_eq!(FieldCipher::decrypt_field(&key, &token).unwrap(), "Alice");
    }

    #[test]
    fn test_token_layout() {
        let key = FieldCipher::generate_key();
        let iv = FieldCipher::generate_iv();

        // "Alice" pads to a single block: 16 bytes IV + 16 bytes ciphertext
        let token = FieldCipher::encrypt_field_with_iv(&key, &iv, "Alice").unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.starts_with(&hex::encode(iv)));
        assert_eq!(FieldCipher::token_iv(&token).unwrap(), iv);
    }

    #[test]
    fn test_block_aligned_plaintext_gets_full_padding_block() {
        let key = FieldCipher::generate_key();

        let token = FieldCipher::encrypt_field(&key, "0123456789abcdef").unwrap();
        assert_eq!(token.len(), (IV_LEN + 32) * 2);
        assert_eq!(
            FieldCipher::decrypt_field(&key, &token).unwrap(),
            "0123456789abcdef"
        );
    }

    #[test]
    fn test_different_ivs() {
        let key = FieldCipher::generate_key();

        let first = FieldCipher::encrypt_field(&key, "X").unwrap();
        let second = FieldCipher::encrypt_field(&key, "X").unwrap();

        // Same plaintext should produce different tokens (different IVs)
        assert_ne!(first, second);
        assert_eq!(FieldCipher::decrypt_field(&key, &first).unwrap(), "X");
        assert_eq!(FieldCipher::decrypt_field(&key, &second).unwrap(), "X");
    }

    #[test]
    fn test_empty_and_unicode_plaintext() {
        let key = FieldCipher::generate_key();

        for value in ["", "患者名: 田中太郎 🏥"] {
            let token = FieldCipher::encrypt_field(&key, value).unwrap();
            assert_eq!(FieldCipher::decrypt_field(&key, &token).unwrap(), value);
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = FieldCipher::generate_key();
        let other = FieldCipher::generate_key();

        let token = FieldCipher::encrypt_field(&key, "alice@x.com").unwrap();
        // A wrong key either breaks the padding or yields garbage bytes
        match FieldCipher::decrypt_field(&other, &token) {
            Err(CryptoError::DecryptionFailed(_) | CryptoError::InvalidUtf8(_)) => {}
            Ok(plaintext) => assert_ne!(plaintext, "alice@x.com"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_tokens() {
        let key = FieldCipher::generate_key();

        assert!(matches!(
            FieldCipher::decrypt_field(&key, "not hex at all"),
            Err(CryptoError::InvalidHex(_))
        ));
        // IV only, no ciphertext
        assert!(matches!(
            FieldCipher::decrypt_field(&key, &"00".repeat(16)),
            Err(CryptoError::InvalidFormat(_))
        ));
        // Ciphertext not a whole number of blocks
        assert!(matches!(
            FieldCipher::decrypt_field(&key, &"00".repeat(40)),
            Err(CryptoError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_truncated_token() {
        let key = FieldCipher::generate_key();
        let token = FieldCipher::encrypt_field(&key, "a longer value spanning two blocks").unwrap();

        let truncated = &token[..token.len() - 32];
        assert!(FieldCipher::decrypt_field(&key, truncated).is_err());
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let key = FieldKey::generate();
        let restored = FieldKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, restored);

        assert!(matches!(
            FieldKey::from_hex("abcd"),
            Err(CryptoError::InvalidKeyLength { expected: 32, got: 2 })
        ));
    }

    #[test]
    fn test_key_equality() {
        let key = FieldKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(key, FieldKey::from_bytes([7u8; KEY_LEN]));

        let mut last_byte_differs = [7u8; KEY_LEN];
        last_byte_differs[KEY_LEN - 1] = 8;
        assert_ne!(key, FieldKey::from_bytes(last_byte_differs));
        assert_ne!(key, FieldKey::generate());
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = FieldKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(format!("{key:?}"), "FieldKey([REDACTED])");
    }

    proptest! {
        #[test]
        fn prop_decrypt_inverts_encrypt(value in ".{0,64}") {
            let key = FieldCipher::generate_key();
            let token = FieldCipher::encrypt_field(&key, &value).unwrap();
            prop_assert_eq!(FieldCipher::decrypt_field(&key, &token).unwrap(), value);
        }
    }
}
