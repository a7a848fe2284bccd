use crate::error::ValidationIssue;
use crate::validation;
use care_records::{CareStaff, Credential, Note, Patient, Record, WellbeingEntry, WellbeingLog};
use chrono::Utc;
use crypto::PasswordHasher;
use database_layer::{collections, Document, DocumentStore};
use error_common::{CarelogError, Result};
use logger_redacted::redact;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Patient registration, login, wellbeing logging and care staff lookup on
/// top of a [`DocumentStore`].
///
/// Lookups by an encrypted field (login, duplicate email checks) decrypt every
/// stored patient in turn; there is no index over ciphertext.
pub struct CareLogService {
    store: Arc<dyn DocumentStore>,
    hasher: PasswordHasher,
}

impl CareLogService {
    pub fn new(store: Arc<dyn DocumentStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn validate_registration(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> std::result::Result<(), ValidationIssue> {
        validation::validate_registration(name, email, phone, password, self.hasher.min_password_length())
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    pub fn register_patient(&self, name: &str, email: &str, phone: &str, password: &str) -> Result<Patient> {
        self.validate_registration(name, email, phone, password)?;

        if self.find_by_email(email)?.is_some() {
            return Err(ValidationIssue::EmailAlreadyInUse.into());
        }

        let patient = Patient::new(
            Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            Credential::Password(password),
            &self.hasher,
        )?;
        self.save(&patient)?;

        info!(patient_id = patient.id(), email = %redact(email), "Patient registered");
        Ok(patient)
    }

    /// First patient whose decrypted email equals `email` and whose password
    /// verifies.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<Patient>> {
        for document in self.store.get_collection(Patient::COLLECTION)? {
            let patient: Patient = rehydrate(&document)?;
            if patient.decrypted_email()? == email && patient.verify_password(password) {
                info!(patient_id = patient.id(), "Patient logged in");
                return Ok(Some(patient));
            }
        }

        warn!(email = %redact(email), "Login failed");
        Ok(None)
    }

    pub fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>> {
        self.find(patient_id)
    }

    pub fn list_patients(&self) -> Result<Vec<Patient>> {
        self.all()
    }

    /// Re-encrypt the supplied fields under the patient's existing key.
    ///
    /// Returns `None` when no patient has `patient_id`.
    pub fn update_patient(
        &self,
        patient_id: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Patient>> {
        if let Some(phone) = phone {
            validation::validate_phone(phone)?;
        }
        if let Some(email) = email {
            validation::validate_email(email)?;
        }

        let Some(mut patient) = self.find::<Patient>(patient_id)? else {
            return Ok(None);
        };

        if let Some(email) = email {
            if let Some(holder) = self.find_by_email(email)? {
                if holder.id() != patient_id {
                    return Err(ValidationIssue::EmailAlreadyInUse.into());
                }
            }
            patient.set_email(email)?;
        }
        if let Some(phone) = phone {
            patient.set_phone(phone)?;
        }
        self.save(&patient)?;

        info!(
            patient_id,
            phone_updated = phone.is_some(),
            email_updated = email.is_some(),
            "Patient updated"
        );
        Ok(Some(patient))
    }

    /// Remove a patient together with their wellbeing logs and notes.
    pub fn remove_patient(&self, patient_id: &str) -> Result<bool> {
        if !self
            .store
            .delete_by_id(Patient::COLLECTION, Patient::ID_KEY, patient_id)?
        {
            return Ok(false);
        }

        let logs = self.remove_for_patient(WellbeingLog::COLLECTION, patient_id)?;
        let notes = self.remove_for_patient(Note::COLLECTION, patient_id)?;

        info!(patient_id, logs, notes, "Patient removed");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Wellbeing logs
    // ------------------------------------------------------------------

    pub fn add_wellbeing_log(
        &self,
        patient_id: &str,
        pain_level: i64,
        mood: &str,
        appetite: &str,
        notes: &str,
    ) -> Result<WellbeingLog> {
        let pain_level = validation::validate_wellbeing(pain_level, mood, appetite)?;

        let entry = WellbeingEntry {
            pain_level,
            mood: mood.to_string(),
            appetite: appetite.to_string(),
            notes: notes.to_string(),
        };
        let log = WellbeingLog::new(Uuid::new_v4().to_string(), patient_id, Utc::now(), &entry)?;
        self.save(&log)?;

        info!(log_id = log.id(), patient_id, "Wellbeing log added");
        Ok(log)
    }

    /// The patient's logs in storage order
    pub fn get_patient_history(&self, patient_id: &str) -> Result<Vec<WellbeingLog>> {
        self.for_patient(patient_id)
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn add_note(&self, patient_id: &str, author: &str, content: &str) -> Result<Note> {
        if author.trim().is_empty() {
            return Err(ValidationIssue::FieldRequired("Author").into());
        }
        if content.trim().is_empty() {
            return Err(ValidationIssue::FieldRequired("Content").into());
        }

        let note = Note::new(Uuid::new_v4().to_string(), patient_id, author, content, Utc::now())?;
        self.save(&note)?;

        info!(note_id = note.id(), patient_id, "Note added");
        Ok(note)
    }

    pub fn notes_for_patient(&self, patient_id: &str) -> Result<Vec<Note>> {
        self.for_patient(patient_id)
    }

    // ------------------------------------------------------------------
    // Care staff
    // ------------------------------------------------------------------

    pub fn register_care_staff(
        &self,
        name: &str,
        department: &str,
        specialization: &str,
        email: Option<&str>,
    ) -> Result<CareStaff> {
        let mut staff = CareStaff::new(Uuid::new_v4().to_string(), name, department, specialization)?;
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            validation::validate_email(email)?;
            staff = staff.with_email(email);
        }
        self.save(&staff)?;

        info!(carestaff_id = staff.id(), "Care staff registered");
        Ok(staff)
    }

    pub fn list_care_staff(&self) -> Result<Vec<CareStaff>> {
        self.all()
    }

    pub fn remove_care_staff(&self, carestaff_id: &str) -> Result<bool> {
        let removed = self
            .store
            .delete_by_id(CareStaff::COLLECTION, CareStaff::ID_KEY, carestaff_id)?;
        if removed {
            info!(carestaff_id, "Care staff removed");
        }
        Ok(removed)
    }

    /// Staff documents whose name, department or specialization contains
    /// `query`, ignoring case, in storage order.
    ///
    /// Older documents keep the department under `field`. Missing keys match
    /// only the empty query.
    pub fn search_care_staff(&self, query: &str) -> Result<Vec<Document>> {
        let query = query.to_lowercase();
        let mut matches = Vec::new();

        for item in self.store.get_collection(collections::CARESTAFFS)? {
            let Value::Object(document) = item else {
                warn!("Skipping care staff entry that is not an object");
                continue;
            };

            let text = |key: &str| {
                document
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_lowercase()
            };
            let department = match text("department") {
                department if department.is_empty() => text("field"),
                department => department,
            };

            if text("name").contains(&query)
                || department.contains(&query)
                || text("specialization").contains(&query)
            {
                matches.push(document);
            }
        }

        Ok(matches)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn save<R: Record>(&self, record: &R) -> Result<()> {
        self.store
            .upsert(R::COLLECTION, R::ID_KEY, record.to_document())?;
        Ok(())
    }

    fn find<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.store
            .get_by_id(R::COLLECTION, R::ID_KEY, id)?
            .map(|document| rehydrate(&Value::Object(document)))
            .transpose()
    }

    fn all<R: Record>(&self) -> Result<Vec<R>> {
        self.store
            .get_collection(R::COLLECTION)?
            .iter()
            .map(rehydrate)
            .collect()
    }

    fn for_patient<R: Record>(&self, patient_id: &str) -> Result<Vec<R>> {
        self.store
            .get_collection(R::COLLECTION)?
            .iter()
            .filter(|document| belongs_to(document, patient_id))
            .map(rehydrate)
            .collect()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Patient>> {
        for document in self.store.get_collection(Patient::COLLECTION)? {
            let patient: Patient = rehydrate(&document)?;
            if patient.decrypted_email()? == email {
                return Ok(Some(patient));
            }
        }
        Ok(None)
    }

    fn remove_for_patient(&self, collection: &str, patient_id: &str) -> Result<usize> {
        let mut items = self.store.get_collection(collection)?;
        let before = items.len();
        items.retain(|document| !belongs_to(document, patient_id));

        let removed = before - items.len();
        if removed > 0 {
            self.store.set_collection(collection, items)?;
        }
        Ok(removed)
    }
}

fn belongs_to(document: &Value, patient_id: &str) -> bool {
    document.get("patient_id").and_then(Value::as_str) == Some(patient_id)
}

/// A stored document that fails to decode is corrupt data, not bad input
fn rehydrate<R: Record>(document: &Value) -> Result<R> {
    R::from_document(document).map_err(|e| {
        CarelogError::storage(format!("corrupt document in '{}': {e}", R::COLLECTION))
    })
}

impl std::fmt::Debug for CareLogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CareLogService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
