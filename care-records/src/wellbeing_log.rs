use crate::error::{RecordError, RecordResult};
use crate::record::{as_object, decode_iv, decode_key, document, require_non_empty, required_str, seal, Record};
use crate::timestamp;
use chrono::{DateTime, Utc};
use crypto::{CryptoError, CryptoResult, FieldCipher, FieldKey, IV_LEN};
use database_layer::{collections, Document};
use serde_json::Value;

pub const MIN_PAIN_LEVEL: u8 = 1;
pub const MAX_PAIN_LEVEL: u8 = 10;

/// Plaintext content of a wellbeing check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellbeingEntry {
    pub pain_level: u8,
    pub mood: String,
    pub appetite: String,
    pub notes: String,
}

/// An encrypted wellbeing check-in. Logs are written once and never updated.
#[derive(Debug, Clone)]
pub struct WellbeingLog {
    id: String,
    patient_id: String,
    timestamp: DateTime<Utc>,
    pain_level: String,
    mood: String,
    appetite: String,
    notes: String,
    key: FieldKey,
    iv: [u8; IV_LEN],
}

impl WellbeingLog {
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        entry: &WellbeingEntry,
    ) -> RecordResult<Self> {
        let id = id.into();
        let patient_id = patient_id.into();
        require_non_empty(&id, "id")?;
        require_non_empty(&patient_id, "patient_id")?;
        if !(MIN_PAIN_LEVEL..=MAX_PAIN_LEVEL).contains(&entry.pain_level) {
            return Err(RecordError::invalid(
                "pain_level",
                format!("must be between {MIN_PAIN_LEVEL} and {MAX_PAIN_LEVEL}"),
            ));
        }
        require_non_empty(&entry.mood, "mood")?;
        require_non_empty(&entry.appetite, "appetite")?;
        require_non_empty(&entry.notes, "notes")?;

        let key = FieldCipher::generate_key();
        let mut iv = [0u8; IV_LEN];
        let pain_level = seal(&key, &mut iv, &entry.pain_level.to_string())?;
        let mood = seal(&key, &mut iv, &entry.mood)?;
        let appetite = seal(&key, &mut iv, &entry.appetite)?;
        let notes = seal(&key, &mut iv, &entry.notes)?;

        Ok(Self {
            id,
            patient_id,
            timestamp,
            pain_level,
            mood,
            appetite,
            notes,
            key,
            iv,
        })
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Decrypted pain level; a stored value that is not a plain decimal in
    /// `MIN_PAIN_LEVEL..=MAX_PAIN_LEVEL` is reported as a malformed ciphertext.
    pub fn decrypted_pain_level(&self) -> CryptoResult<u8> {
        let raw = FieldCipher::decrypt_field(&self.key, &self.pain_level)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptoError::InvalidFormat(
                "decrypted pain level is not a valid integer".to_string(),
            ));
        }
        raw.parse::<u8>()
            .ok()
            .filter(|level| (MIN_PAIN_LEVEL..=MAX_PAIN_LEVEL).contains(level))
            .ok_or_else(|| {
                CryptoError::InvalidFormat(format!("decrypted pain level '{raw}' is out of range"))
            })
    }

    pub fn decrypted_mood(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.mood)
    }

    pub fn decrypted_appetite(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.appetite)
    }

    pub fn decrypted_notes(&self) -> CryptoResult<String> {
        FieldCipher::decrypt_field(&self.key, &self.notes)
    }

    /// All encrypted fields at once
    pub fn decrypt(&self) -> CryptoResult<WellbeingEntry> {
        Ok(WellbeingEntry {
            pain_level: self.decrypted_pain_level()?,
            mood: self.decrypted_mood()?,
            appetite: self.decrypted_appetite()?,
            notes: self.decrypted_notes()?,
        })
    }
}

impl Record for WellbeingLog {
    const COLLECTION: &'static str = collections::WELLBEING_LOGS;
    const ID_KEY: &'static str = "id";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        document([
            ("id", Value::String(self.id.clone())),
            ("patient_id", Value::String(self.patient_id.clone())),
            ("timestamp", Value::String(timestamp::format(&self.timestamp))),
            ("key", Value::String(self.key.to_hex())),
            ("iv", Value::String(hex::encode(self.iv))),
            ("pain_level", Value::String(self.pain_level.clone())),
            ("mood", Value::String(self.mood.clone())),
            ("appetite", Value::String(self.appetite.clone())),
            ("notes", Value::String(self.notes.clone())),
        ])
    }

    fn from_document(document: &Value) -> RecordResult<Self> {
        let doc = as_object(document)?;
        let raw_timestamp = required_str(doc, "timestamp")?;
        let timestamp = timestamp::parse(raw_timestamp).ok_or_else(|| {
            RecordError::invalid("timestamp", format!("unrecognised format '{raw_timestamp}'"))
        })?;

        Ok(Self {
            id: required_str(doc, "id")?.to_string(),
            patient_id: required_str(doc, "patient_id")?.to_string(),
            timestamp,
            pain_level: required_str(doc, "pain_level")?.to_string(),
            mood: required_str(doc, "mood")?.to_string(),
            appetite: required_str(doc, "appetite")?.to_string(),
            notes: required_str(doc, "notes")?.to_string(),
            key: decode_key(doc)?,
            iv: decode_iv(doc)?,
        })
    }
}

impl PartialEq for WellbeingLog {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.patient_id == other.patient_id
            && self.timestamp == other.timestamp
            && self.pain_level == other.pain_level
            && self.mood == other.mood
            && self.appetite == other.appetite
            && self.notes == other.notes
    }
}

impl Eq for WellbeingLog {}
