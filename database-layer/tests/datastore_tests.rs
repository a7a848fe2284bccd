// Persistence tests for the JSON document store
use database_layer::{
    collections, Document, DocumentStore, InMemoryStore, JsonFileStore, StorageError, UpsertOutcome,
};
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn temp_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data").join("carelog_data.json"));
    (dir, store)
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn ids(store: &dyn DocumentStore, collection: &str) -> Vec<String> {
    store
        .get_collection(collection)
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap_or("<none>").to_string())
        .collect()
}

// =============================================================================
// FILE LIFECYCLE
// =============================================================================

#[test]
fn test_ensure_file_creates_parent_and_skeleton() {
    let (_dir, store) = temp_store();
    assert!(!store.path().exists());

    assert!(store.ensure_file().unwrap());
    assert!(store.path().exists());

    let snapshot = store.load_all().unwrap();
    for name in collections::REQUIRED {
        assert_eq!(snapshot[name], json!([]), "collection {name} should start empty");
    }
}

#[test]
fn test_ensure_file_is_idempotent_and_keeps_data() {
    let (_dir, store) = temp_store();
    store
        .upsert(collections::PATIENTS, "id", doc(json!({"id": "p-1"})))
        .unwrap();

    let before = fs::read_to_string(store.path()).unwrap();
    assert!(!store.ensure_file().unwrap());
    assert!(!store.ensure_file().unwrap());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_malformed_file_is_an_error_and_left_untouched() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "{\"patients\": [").unwrap();

    assert!(matches!(store.load_all(), Err(StorageError::Malformed { .. })));
    assert!(store.get_collection(collections::PATIENTS).is_err());
    assert!(store
        .upsert(collections::PATIENTS, "id", doc(json!({"id": "p-1"})))
        .is_err());

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{\"patients\": [");
}

#[test]
fn test_saved_file_is_pretty_printed() {
    let (_dir, store) = temp_store();
    store
        .upsert(collections::NOTES, "id", doc(json!({"id": "n-1", "content": "token"})))
        .unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\n    \"notes\": [\n        {"));
    assert!(raw.ends_with("}\n"));
}

// =============================================================================
// COLLECTION OPERATIONS
// =============================================================================

#[test]
fn test_absent_collection_is_empty() {
    let (_dir, store) = temp_store();
    assert!(store.get_collection("unknown").unwrap().is_empty());
    assert!(store.get_by_id("unknown", "id", "x").unwrap().is_none());
}

#[test]
fn test_non_array_collection_is_an_error() {
    let (_dir, store) = temp_store();
    store.ensure_file().unwrap();
    fs::write(store.path(), r#"{"patients": {"id": "p-1"}}"#).unwrap();

    assert!(matches!(
        store.get_collection(collections::PATIENTS),
        Err(StorageError::InvalidCollection { found: "object", .. })
    ));
}

#[test]
fn test_upsert_is_idempotent_and_keeps_position() {
    let (_dir, store) = temp_store();
    let c = collections::PATIENTS;

    assert_eq!(
        store.upsert(c, "id", doc(json!({"id": "a", "v": 1}))).unwrap(),
        UpsertOutcome::Inserted
    );
    store.upsert(c, "id", doc(json!({"id": "b", "v": 1}))).unwrap();
    store.upsert(c, "id", doc(json!({"id": "c", "v": 1}))).unwrap();

    assert_eq!(
        store.upsert(c, "id", doc(json!({"id": "b", "v": 2}))).unwrap(),
        UpsertOutcome::Replaced
    );
    store.upsert(c, "id", doc(json!({"id": "b", "v": 2}))).unwrap();

    assert_eq!(ids(&store, c), vec!["a", "b", "c"]);
    let b = store.get_by_id(c, "id", "b").unwrap().unwrap();
    assert_eq!(b["v"], json!(2));
}

#[test]
fn test_upsert_without_id_appends() {
    let (_dir, store) = temp_store();
    let c = collections::SCHEDULES;

    let item = doc(json!({"slot": "09:00"}));
    assert_eq!(
        store.upsert(c, "id", item.clone()).unwrap(),
        UpsertOutcome::AppendedWithoutId
    );
    store.upsert(c, "id", item).unwrap();
    store
        .upsert(c, "id", doc(json!({"id": null, "slot": "10:00"})))
        .unwrap();

    assert_eq!(store.get_collection(c).unwrap().len(), 3);
}

#[test]
fn test_upsert_with_custom_id_key() {
    let (_dir, store) = temp_store();
    let c = collections::CARESTAFFS;

    store
        .upsert(c, "carestaffID", doc(json!({"carestaffID": "s-1", "name": "x"})))
        .unwrap();
    store
        .upsert(c, "carestaffID", doc(json!({"carestaffID": "s-1", "name": "y"})))
        .unwrap();

    let staff = store.get_collection(c).unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0]["name"], json!("y"));
}

#[test]
fn test_get_by_id_returns_first_match() {
    let (_dir, store) = temp_store();
    let c = collections::NOTES;
    store
        .set_collection(
            c,
            vec![
                json!({"id": "n-1", "content": "first"}),
                json!({"id": "n-1", "content": "second"}),
            ],
        )
        .unwrap();

    let found = store.get_by_id(c, "id", "n-1").unwrap().unwrap();
    assert_eq!(found["content"], json!("first"));
    assert!(store.get_by_id(c, "id", "n-2").unwrap().is_none());
}

#[test]
fn test_delete_removes_all_duplicates() {
    let (_dir, store) = temp_store();
    let c = collections::WELLBEING_LOGS;
    store
        .set_collection(
            c,
            vec![json!({"id": "x"}), json!({"id": "keep"}), json!({"id": "x"})],
        )
        .unwrap();

    assert!(store.delete_by_id(c, "id", "x").unwrap());
    assert_eq!(ids(&store, c), vec!["keep"]);
}

#[test]
fn test_delete_missing_id_does_not_rewrite() {
    let (_dir, store) = temp_store();
    store
        .append(collections::PATIENTS, json!({"id": "p-1"}))
        .unwrap();

    let before = fs::read_to_string(store.path()).unwrap();
    let modified = fs::metadata(store.path()).unwrap().modified().unwrap();

    assert!(!store.delete_by_id(collections::PATIENTS, "id", "nope").unwrap());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(fs::metadata(store.path()).unwrap().modified().unwrap(), modified);
}

// =============================================================================
// CRASH SAFETY
// =============================================================================

#[test]
fn test_abandoned_temp_file_leaves_old_content() {
    let (_dir, store) = temp_store();
    store
        .upsert(collections::PATIENTS, "id", doc(json!({"id": "p-1"})))
        .unwrap();
    let dir = store.path().parent().unwrap();

    // A writer that dies before the rename
    {
        let mut tmp = tempfile::NamedTempFile::new_in(dir).unwrap();
        tmp.write_all(b"{\"patients\": [{\"id\": \"half").unwrap();
    }
    // A stray temp file left behind by a killed process
    fs::write(dir.join(".tmpCRASH"), "{\"patients\"").unwrap();

    assert_eq!(ids(&store, collections::PATIENTS), vec!["p-1"]);

    store
        .upsert(collections::PATIENTS, "id", doc(json!({"id": "p-2"})))
        .unwrap();
    assert_eq!(ids(&store, collections::PATIENTS), vec!["p-1", "p-2"]);
}

// =============================================================================
// STORE PARITY
// =============================================================================

fn exercise(store: &dyn DocumentStore) -> Vec<Value> {
    let c = collections::PATIENTS;
    store.upsert(c, "id", doc(json!({"id": "a", "v": 1}))).unwrap();
    store.upsert(c, "id", doc(json!({"id": "b", "v": 1}))).unwrap();
    store.upsert(c, "id", doc(json!({"id": "a", "v": 2}))).unwrap();
    store.upsert(c, "id", doc(json!({"v": 3}))).unwrap();
    store.delete_by_id(c, "id", "b").unwrap();
    store.get_collection(c).unwrap()
}

#[test]
fn test_in_memory_store_matches_file_store() {
    let (_dir, file_store) = temp_store();
    let memory_store = InMemoryStore::new();

    assert_eq!(exercise(&file_store), exercise(&memory_store));
    assert_eq!(
        memory_store.load_all().unwrap().len(),
        collections::REQUIRED.len()
    );
}
