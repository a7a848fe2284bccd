use crate::collections;
use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};
use crate::store::{json_type_name, DocumentStore, Snapshot};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Document store backed by a single pretty-printed JSON file.
///
/// Writes go to a temporary file in the target's directory which is then
/// renamed over the target, so readers only ever observe the complete old
/// content or the complete new content.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    collections: Vec<String>,
}

impl JsonFileStore {
    /// Store at `path` seeded with the standard collections
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            collections: collections::REQUIRED.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            collections: config.collections.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file with an empty array per collection if it is absent.
    ///
    /// Returns `true` when the file was created. An existing file is never
    /// touched, whatever its content.
    pub fn ensure_file(&self) -> StorageResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let skeleton: Snapshot = self
            .collections
            .iter()
            .map(|name| (name.clone(), Value::Array(Vec::new())))
            .collect();
        self.write_atomic(&skeleton)?;

        tracing::info!(path = %self.path.display(), "Created data file");
        Ok(true)
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    fn write_atomic(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(tmp.as_file_mut(), formatter);
        snapshot.serialize(&mut serializer)?;

        let file = tmp.as_file_mut();
        file.write_all(b"\n")
            .and_then(|()| file.sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;

        // Rename is the last step; dropping `tmp` before this point removes it
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), "Saved data file");
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load_all(&self) -> StorageResult<Snapshot> {
        self.ensure_file()?;

        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let document: Value = serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        match document {
            Value::Object(snapshot) => Ok(snapshot),
            other => Err(StorageError::InvalidDocument(format!(
                "{} holds a JSON {}, expected an object of collections",
                self.path.display(),
                json_type_name(&other)
            ))),
        }
    }

    fn save_all(&self, snapshot: &Snapshot) -> StorageResult<()> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        self.write_atomic(snapshot)
    }
}
