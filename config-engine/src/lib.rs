//! Layered configuration for the CareLog engine
//!
//! Settings are merged from the following sources, lowest precedence first:
//!
//! - **Defaults**: built into each section's `Default` impl
//! - **File**: YAML (`.yaml`/`.yml`) or TOML (`.toml`), chosen by extension
//! - **Environment**: `CARELOG_<SECTION>__<KEY>`, e.g. `CARELOG_STORAGE__DATA_FILE`
//!
//! The merged result is validated before it is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::CarelogSettings;
//! use std::path::Path;
//!
//! let settings = CarelogSettings::load(Some(Path::new("carelog.yaml")))?;
//! println!("data file: {}", settings.storage.data_file.display());
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod providers;
pub mod settings;
pub mod validation;

pub use error::*;
pub use providers::{ConfigSource, ENV_PREFIX};
pub use settings::CarelogSettings;
