use crate::error::RecordResult;
use crate::record::{
    as_object, decode_iv, decode_key, document, require_non_empty, required_str, seal, Credential,
    Record,
};
use crypto::{CryptoResult, FieldCipher, FieldKey, PasswordHasher, IV_LEN};
use database_layer::{collections, Document};
use serde_json::Value;

/// A patient with encrypted contact details.
///
/// Name, email and phone are held as `hex(iv || ciphertext)` tokens under a
/// key generated when the record is created. The key never changes; updating
/// a field re-encrypts it under the same key with a fresh IV.
#[derive(Debug, Clone)]
pub struct Patient {
    id: String,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    key: FieldKey,
    iv: [u8; IV_LEN],
}

impl Patient {
    /// Build a patient from plaintext details, encrypting each field.
    pub fn new(
        id: impl Into<String>,
        name: &str,
        email: &str,
        phone: &str,
        credential: Credential<'_>,
        hasher: &PasswordHasher,
    ) -> RecordResult<Self> {
        let id = id.into();
        require_non_empty(&id, "id")?;
        require_non_empty(name, "name")?;
        require_non_empty(email, "email")?;
        require_non_empty(phone, "phone")?;

        let password_hash = match credential {
            Credential::Password(password) => {
                require_non_empty(password, "password")?;
                hasher.hash(password)?
            }
            Credential::Hash(hash) => {
                require_non_empty(hash, "password_hash")?;
                hash.to_string()
            }
        };

        let key = FieldCipher::generate_key();
        let mut iv = [0u8; IV_LEN];
        let name = seal(&key, &mut iv, name)?;
        let email = seal(&key, &mut iv, email)?;
        let phone = seal(&key, &mut iv, phone)?;

        Ok(Self {
            id,
            name,
            email,
            phone,
            password_hash,
            key,
            iv,
        })
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Hex of the IV drawn by the most recent field encryption
    pub fn iv_hex(&self) -> String {
        hex::encode(self.iv)
    }

    pub fn decrypted_name(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.name)
    }

    pub fn decrypted_email(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.email)
    }

    pub fn decrypted_phone(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.phone)
    }

    pub fn set_email(&mut self, email: &str) -> RecordResult<()> {
        require_non_empty(email, "email")?;
        self.email = seal(&self.key, &mut self.iv, email)?;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) -> RecordResult<()> {
        require_non_empty(phone, "phone")?;
        self.phone = seal(&self.key, &mut self.iv, phone)?;
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHasher::verify(&self.password_hash, password)
    }
}

impl Record for Patient {
    const COLLECTION: &'static str = collections::PATIENTS;
    const ID_KEY: &'static str = "id";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        document([
            ("id", Value::String(self.id.clone())),
            ("name", Value::String(self.name.clone())),
            ("email", Value::String(self.email.clone())),
            ("phone", Value::String(self.phone.clone())),
            ("password_hash", Value::String(self.password_hash.clone())),
            ("key", Value::String(self.key.to_hex())),
            ("iv", Value::String(self.iv_hex())),
        ])
    }

    fn from_document(document: &Value) -> RecordResult<Self> {
        let doc = as_object(document)?;
        Ok(Self {
            id: required_str(doc, "id")?.to_string(),
            name: required_str(doc, "name")?.to_string(),
            email: required_str(doc, "email")?.to_string(),
            phone: required_str(doc, "phone")?.to_string(),
            password_hash: required_str(doc, "password_hash")?.to_string(),
            key: decode_key(doc)?,
            iv: decode_iv(doc)?,
        })
    }
}

/// Records compare by their stored form: id, ciphertext tokens and password
/// hash. Two patients with equal plaintext but separately encrypted fields are
/// not equal.
impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.email == other.email
            && self.phone == other.phone
            && self.password_hash == other.password_hash
    }
}

impl Eq for Patient {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crypto::{Argon2Params, HashScheme, HasherConfig};

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HasherConfig {
            scheme: HashScheme::Bcrypt,
            argon2: Argon2Params::default(),
            bcrypt_cost: 4,
            min_password_length: 6,
        })
        .unwrap()
    }

    fn alice() -> Patient {
        Patient::new(
            "p-1",
            "Alice",
            "alice@x.com",
            "0123456789",
            Credential::Password("secret1"),
            &hasher(),
        )
        .unwrap()
    }

    #[test]
    fn test_fields_are_encrypted() {
        let patient = alice();
        let doc = patient.to_document();

        for field in ["name", "email", "phone"] {
            let stored = doc[field].as_str().unwrap();
            assert!(!stored.contains("Alice") && !stored.contains("alice"));
            assert!(hex::decode(stored).is_ok());
        }
        assert_eq!(patient.decrypted_name().unwrap(), "Alice");
        assert_eq!(patient.decrypted_email().unwrap(), "alice@x.com");
        assert_eq!(patient.decrypted_phone().unwrap(), "0123456789");
    }

    #[test]
    fn test_record_iv_tracks_last_encryption() {
        let mut patient = alice();
        let phone_iv = FieldCipher::token_iv(&patient.phone).unwrap();
        assert_eq!(patient.iv, phone_iv);

        patient.set_email("new@x.com").unwrap();
        assert_eq!(patient.iv, FieldCipher::token_iv(&patient.email).unwrap());
        assert_ne!(patient.iv, phone_iv);
    }

    #[test]
    fn test_missing_plaintext_field_named() {
        let err = Patient::new(
            "p-1",
            "Alice",
            " ",
            "0123456789",
            Credential::Password("secret1"),
            &hasher(),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::MissingField("email")));
    }

    #[test]
    fn test_pre_hashed_credential_kept() {
        let patient = Patient::new(
            "p-2",
            "Bob",
            "bob@x.com",
            "555",
            Credential::Hash("$2b$04$existinghash"),
            &hasher(),
        )
        .unwrap();
        assert_eq!(patient.password_hash(), "$2b$04$existinghash");
    }

    #[test]
    fn test_update_keeps_key() {
        let mut patient = alice();
        let key_before = patient.key.to_hex();

        patient.set_phone("999").unwrap();
        assert_eq!(patient.key.to_hex(), key_before);
        assert_eq!(patient.decrypted_phone().unwrap(), "999");
        assert_eq!(patient.decrypted_name().unwrap(), "Alice");
    }
}
