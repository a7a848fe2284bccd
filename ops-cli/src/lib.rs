//! Operator CLI for the CareLog engine
//!
//! # Example Usage
//!
//! ```bash
//! # Prepare the data file
//! carelog --config carelog.yaml init
//!
//! # Patients
//! carelog register-patient --name Alice --email alice@x.com --phone 0123456789 --password secret1
//! carelog login --email alice@x.com --password secret1
//! carelog update-patient --patient-id <id> --phone 0987654321
//!
//! # Wellbeing logs and notes
//! carelog add-log --patient-id <id> --pain-level 5 --mood Calm --appetite Good --notes fine
//! carelog history --patient-id <id>
//! carelog add-note --patient-id <id> --author Dana --content "Bloods taken"
//!
//! # Care staff
//! carelog add-staff --name "Dana Smith" --department Cardiology --specialization "Heart failure"
//! carelog search-staff cardio
//! ```
//!
//! Failures print `CODE: message` on stderr and exit non-zero.

pub mod cli;
pub mod commands;

use carelog_service::CareLogService;
use config_engine::CarelogSettings;
use crypto::PasswordHasher;
use database_layer::JsonFileStore;
use error_common::Result;
use std::sync::Arc;

pub use cli::{Cli, Command};
pub use commands::{run, Outcome};

/// Apply command-line overrides on top of the loaded settings
pub fn apply_overrides(settings: &mut CarelogSettings, cli: &Cli) {
    if let Some(data_file) = &cli.data_file {
        settings.storage.data_file.clone_from(data_file);
    }
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
}

/// Open the configured store and build the service over it
pub fn build_service(settings: &CarelogSettings) -> Result<(Arc<JsonFileStore>, CareLogService)> {
    let store = Arc::new(JsonFileStore::from_config(&settings.storage));
    let hasher = PasswordHasher::new(settings.security.clone())?;
    let service = CareLogService::new(store.clone(), hasher);
    Ok((store, service))
}
