use crate::error::{RecordError, RecordResult};
use crate::record::{as_object, document, require_non_empty, required_str, Record};
use crate::timestamp;
use chrono::{DateTime, Utc};
use database_layer::{collections, Document};
use serde_json::Value;

/// Free-text care note attached to a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub patient_id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> RecordResult<Self> {
        let note = Self {
            id: id.into(),
            patient_id: patient_id.into(),
            author: author.into(),
            content: content.into(),
            timestamp,
        };
        require_non_empty(&note.id, "id")?;
        require_non_empty(&note.patient_id, "patient_id")?;
        require_non_empty(&note.author, "author")?;
        require_non_empty(&note.content, "content")?;
        Ok(note)
    }
}

impl Record for Note {
    const COLLECTION: &'static str = collections::NOTES;
    const ID_KEY: &'static str = "id";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        document([
            ("id", Value::String(self.id.clone())),
            ("patient_id", Value::String(self.patient_id.clone())),
            ("author", Value::String(self.author.clone())),
            ("content", Value::String(self.content.clone())),
            ("timestamp", Value::String(timestamp::format(&self.timestamp))),
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
            author: required_str(doc, "author")?.to_string(),
            content: required_str(doc, "content")?.to_string(),
            timestamp,
        })
    }
}
