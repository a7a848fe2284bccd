use crate::error::{RecordError, RecordResult};
use crypto::{CryptoResult, FieldCipher, FieldKey, IV_LEN};
use database_layer::Document;
use serde_json::Value;

/// A document type persisted in one named collection.
pub trait Record: Sized {
    /// Collection the record lives in
    const COLLECTION: &'static str;
    /// Key of the id field inside the stored document
    const ID_KEY: &'static str;

    fn id(&self) -> &str;

    /// Plain document as written to storage. Encrypted fields stay encrypted.
    fn to_document(&self) -> Document;

    /// Rehydrate from a stored document without re-encrypting anything.
    fn from_document(document: &Value) -> RecordResult<Self>;
}

/// Password material for a new patient.
///
/// A record is built from exactly one of the two, never both.
#[derive(Debug, Clone, Copy)]
pub enum Credential<'a> {
    /// Plaintext password, hashed while the record is built
    Password(&'a str),
    /// Hash produced earlier, stored as-is
    Hash(&'a str),
}

pub(crate) fn as_object(document: &Value) -> RecordResult<&Document> {
    document.as_object().ok_or(RecordError::NotAnObject)
}

/// A stored string field that must be present and non-empty
pub(crate) fn required_str<'a>(document: &'a Document, key: &'static str) -> RecordResult<&'a str> {
    match document.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.as_str()),
        Some(Value::String(_) | Value::Null) | None => Err(RecordError::MissingField(key)),
        Some(_) => Err(RecordError::invalid(key, "expected a string")),
    }
}

/// A stored string field that may be absent
pub(crate) fn optional_str(document: &Document, key: &str) -> String {
    document
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn require_non_empty(value: &str, field: &'static str) -> RecordResult<()> {
    if value.trim().is_empty() {
        Err(RecordError::MissingField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn decode_key(document: &Document) -> RecordResult<FieldKey> {
    Ok(FieldKey::from_hex(required_str(document, "key")?)?)
}

pub(crate) fn decode_iv(document: &Document) -> RecordResult<[u8; IV_LEN]> {
    let bytes = hex::decode(required_str(document, "iv")?)
        .map_err(|e| RecordError::invalid("iv", e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| RecordError::invalid("iv", format!("expected {IV_LEN} bytes, got {}", bytes.len())))
}

/// Encrypt one field under the record key with a fresh IV, remembering that
/// IV as the record's most recent one.
pub(crate) fn seal(key: &FieldKey, last_iv: &mut [u8; IV_LEN], value: &str) -> CryptoResult<String> {
    let iv = FieldCipher::generate_iv();
    let token = FieldCipher::encrypt_field_with_iv(key, &iv, value)?;
    *last_iv = iv;
    Ok(token)
}

pub(crate) fn document<const N: usize>(fields: [(&str, Value); N]) -> Document {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
