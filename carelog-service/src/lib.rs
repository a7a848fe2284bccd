//! CareLog service layer
//!
//! Orchestrates the record codecs and the document store:
//! - Patient registration with input validation and duplicate-email checks
//! - Login by decrypting each stored email and verifying the password hash
//! - Wellbeing logs and care notes per patient
//! - Care staff directory and search
//!
//! # Example
//!
//! ```rust,no_run
//! use carelog_service::CareLogService;
//! use crypto::{HasherConfig, PasswordHasher};
//! use database_layer::JsonFileStore;
//! use std::sync::Arc;
//!
//! fn main() -> error_common::Result<()> {
//!     let store = Arc::new(JsonFileStore::new("data/carelog_data.json"));
//!     let service = CareLogService::new(store, PasswordHasher::new(HasherConfig::default())?);
//!
//!     let patient = service.register_patient("Alice", "alice@x.com", "0123456789", "secret1")?;
//!     let logged_in = service.login("alice@x.com", "secret1")?;
//!     assert_eq!(logged_in, Some(patient));
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod service;
pub mod validation;

pub use error::ValidationIssue;
pub use service::CareLogService;
