use crate::error::RecordResult;
use crate::record::{as_object, document, optional_str, require_non_empty, required_str, Record};
use database_layer::{collections, Document};
use serde_json::Value;

pub const DEFAULT_ROLE: &str = "carestaff";

/// Directory entry for a member of the care team. Stored unencrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareStaff {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub specialization: String,
    pub role: String,
}

impl CareStaff {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        specialization: impl Into<String>,
    ) -> RecordResult<Self> {
        let id = id.into();
        let name = name.into();
        require_non_empty(&id, "carestaffID")?;
        require_non_empty(&name, "name")?;

        Ok(Self {
            email: format!("{id}@carelog.local"),
            id,
            name,
            department: department.into(),
            specialization: specialization.into(),
            role: DEFAULT_ROLE.to_string(),
        })
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

impl Record for CareStaff {
    const COLLECTION: &'static str = collections::CARESTAFFS;
    const ID_KEY: &'static str = "carestaffID";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_document(&self) -> Document {
        document([
            ("carestaffID", Value::String(self.id.clone())),
            ("name", Value::String(self.name.clone())),
            ("email", Value::String(self.email.clone())),
            ("department", Value::String(self.department.clone())),
            ("specialization", Value::String(self.specialization.clone())),
            ("role", Value::String(self.role.clone())),
        ])
    }

    /// Older staff documents name the department `field` and may lack
    /// optional keys; both are accepted.
    fn from_document(document: &Value) -> RecordResult<Self> {
        let doc = as_object(document)?;
        let department = match optional_str(doc, "department") {
            department if department.is_empty() => optional_str(doc, "field"),
            department => department,
        };
        let role = match optional_str(doc, "role") {
            role if role.is_empty() => DEFAULT_ROLE.to_string(),
            role => role,
        };

        Ok(Self {
            id: required_str(doc, "carestaffID")?.to_string(),
            name: required_str(doc, "name")?.to_string(),
            email: optional_str(doc, "email"),
            department,
            specialization: optional_str(doc, "specialization"),
            role,
        })
    }
}
