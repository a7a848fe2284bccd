//! Record codecs for the CareLog engine
//!
//! Each record type converts between an in-memory value and the plain JSON
//! document kept by [`database_layer::DocumentStore`]:
//!
//! - [`Patient`]: name, email and phone encrypted under a per-record key, plus
//!   a one-way password hash
//! - [`WellbeingLog`]: pain level, mood, appetite and notes encrypted under a
//!   per-record key
//! - [`CareStaff`] and [`Note`]: stored in plain form
//!
//! Building a record from plaintext validates and encrypts it. Rehydrating
//! with [`Record::from_document`] only checks that the stored keys are present
//! and leaves every ciphertext untouched until a `decrypted_*` accessor is
//! called.

pub mod care_staff;
pub mod error;
pub mod note;
pub mod patient;
pub mod record;
pub mod timestamp;
pub mod wellbeing_log;

pub use care_staff::CareStaff;
pub use error::{RecordError, RecordResult};
pub use note::Note;
pub use patient::Patient;
pub use record::{Credential, Record};
pub use wellbeing_log::{WellbeingEntry, WellbeingLog, MAX_PAIN_LEVEL, MIN_PAIN_LEVEL};
