use crate::collections;
use crate::error::StorageResult;
use crate::store::{DocumentStore, Snapshot};
use parking_lot::Mutex;
use serde_json::Value;

/// Process-local document store, for tests and dry runs
#[derive(Debug)]
pub struct InMemoryStore {
    snapshot: Mutex<Snapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        let snapshot = collections::REQUIRED
            .iter()
            .map(|name| ((*name).to_string(), Value::Array(Vec::new())))
            .collect();
        Self::with_snapshot(snapshot)
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryStore {
    fn load_all(&self) -> StorageResult<Snapshot> {
        Ok(self.snapshot.lock().clone())
    }

    fn save_all(&self, snapshot: &Snapshot) -> StorageResult<()> {
        *self.snapshot.lock() = snapshot.clone();
        Ok(())
    }
}
