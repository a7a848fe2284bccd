use crate::error::{StorageError, StorageResult};
use serde_json::{Map, Value};

/// One record: a JSON object inside a collection
pub type Document = Map<String, Value>;

/// The whole data file: collection name -> array of documents
pub type Snapshot = Map<String, Value>;

/// Result of an [`DocumentStore::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No document with the same id existed; the item was appended
    Inserted,
    /// A document with the same id was replaced in place
    Replaced,
    /// The item had no id and was appended without a duplicate check
    AppendedWithoutId,
}

/// Whole-document persistence of named collections.
///
/// Implementors provide [`load_all`](Self::load_all) and
/// [`save_all`](Self::save_all); every collection operation is a full
/// load-modify-save cycle on top of them. Stores assume a single writer: two
/// processes mutating the same backing file race, and the last save wins.
pub trait DocumentStore: Send + Sync {
    /// Read the complete document. Never returns a partially parsed snapshot.
    fn load_all(&self) -> StorageResult<Snapshot>;

    /// Replace the complete document.
    fn save_all(&self, snapshot: &Snapshot) -> StorageResult<()>;

    /// All items of a collection in storage order; empty when the collection
    /// does not exist.
    fn get_collection(&self, name: &str) -> StorageResult<Vec<Value>> {
        let mut snapshot = self.load_all()?;
        match snapshot.remove(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(invalid_collection(name, &other)),
        }
    }

    /// Replace a whole collection.
    fn set_collection(&self, name: &str, items: Vec<Value>) -> StorageResult<()> {
        let mut snapshot = self.load_all()?;
        snapshot.insert(name.to_string(), Value::Array(items));
        self.save_all(&snapshot)
    }

    /// Append an item unconditionally.
    fn append(&self, name: &str, item: Value) -> StorageResult<()> {
        let mut snapshot = self.load_all()?;
        collection_mut(&mut snapshot, name)?.push(item);
        self.save_all(&snapshot)
    }

    /// Insert or replace `item`, keyed by `item[id_key]`.
    ///
    /// An existing document with the same id is replaced at its current
    /// position. An item whose id is missing or `null` is appended as-is.
    fn upsert(&self, collection: &str, id_key: &str, item: Document) -> StorageResult<UpsertOutcome> {
        let mut snapshot = self.load_all()?;
        let items = collection_mut(&mut snapshot, collection)?;

        let outcome = match item.get(id_key).filter(|id| !id.is_null()).cloned() {
            None => {
                items.push(Value::Object(item));
                UpsertOutcome::AppendedWithoutId
            }
            Some(id) => {
                let existing = items
                    .iter_mut()
                    .find(|existing| existing.get(id_key) == Some(&id));
                match existing {
                    Some(slot) => {
                        *slot = Value::Object(item);
                        UpsertOutcome::Replaced
                    }
                    None => {
                        items.push(Value::Object(item));
                        UpsertOutcome::Inserted
                    }
                }
            }
        };

        self.save_all(&snapshot)?;
        tracing::debug!(collection, ?outcome, "Upserted document");
        Ok(outcome)
    }

    /// First document whose `id_key` equals `id_value`.
    fn get_by_id(&self, collection: &str, id_key: &str, id_value: &str) -> StorageResult<Option<Document>> {
        let found = self
            .get_collection(collection)?
            .into_iter()
            .find_map(|item| match item {
                Value::Object(doc) if matches_id(&doc, id_key, id_value) => Some(doc),
                _ => None,
            });
        Ok(found)
    }

    /// Remove every document whose `id_key` equals `id_value`.
    ///
    /// Returns whether anything was removed; the file is only rewritten when
    /// something was.
    fn delete_by_id(&self, collection: &str, id_key: &str, id_value: &str) -> StorageResult<bool> {
        let mut snapshot = self.load_all()?;
        let items = collection_mut(&mut snapshot, collection)?;

        let before = items.len();
        items.retain(|item| !item.as_object().is_some_and(|doc| matches_id(doc, id_key, id_value)));
        let removed = before - items.len();

        if removed == 0 {
            return Ok(false);
        }

        self.save_all(&snapshot)?;
        tracing::debug!(collection, removed, "Deleted documents");
        Ok(true)
    }
}

fn matches_id(doc: &Document, id_key: &str, id_value: &str) -> bool {
    doc.get(id_key).and_then(Value::as_str) == Some(id_value)
}

/// Mutable access to a collection, creating it when absent.
pub(crate) fn collection_mut<'a>(
    snapshot: &'a mut Snapshot,
    name: &str,
) -> StorageResult<&'a mut Vec<Value>> {
    let slot = snapshot
        .entry(name.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => Ok(items),
        other => Err(invalid_collection(name, other)),
    }
}

fn invalid_collection(name: &str, found: &Value) -> StorageError {
    StorageError::InvalidCollection {
        name: name.to_string(),
        found: json_type_name(found),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
