//! Common error handling for the CareLog engine
//!
//! Every crate in the workspace keeps its own `thiserror` enum and converts it
//! into [`CarelogError`] at the service boundary, so callers only ever match on
//! the four kinds that matter to them:
//!
//! - **Validation**: bad or missing input, nothing persisted
//! - **Decryption**: corrupt ciphertext or wrong key
//! - **Storage**: unreadable, malformed, or unwritable data file
//! - **Configuration**: settings that failed to load or validate
//!
//! # Example
//!
//! ```rust
//! use error_common::{CarelogError, Result};
//!
//! fn require(field: &str, value: &str) -> Result<()> {
//!     if value.is_empty() {
//!         return Err(CarelogError::validation(format!("{field} is required")));
//!     }
//!     Ok(())
//! }
//!
//! let err = require("name", "").unwrap_err();
//! assert_eq!(err.code(), "VALIDATION_1001");
//! ```

pub mod codes;
pub mod types;

pub use types::*;
