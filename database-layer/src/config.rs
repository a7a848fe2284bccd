use crate::collections;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/carelog_data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the single JSON document holding every collection
    pub data_file: PathBuf,
    /// Collections created empty when the data file is first written
    pub collections: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            collections: collections::REQUIRED.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}
