use super::*;

fn ada() -> Identity {
    Identity::from_email("ada@example.com").unwrap()
}

#[test]
fn memory_storage_clones_share_items() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    storage.set_item("k", "v").unwrap();
    assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn memory_storage_remove_absent_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove_item("missing").is_ok());
    assert!(storage.is_empty());
}

#[test]
fn load_identity_absent_is_none() {
    let storage = MemoryStorage::new();
    assert!(load_identity(&storage, DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn save_then_load_restores_identity() {
    let storage = MemoryStorage::new();
    save_identity(&storage, DEFAULT_STORAGE_KEY, &ada()).unwrap();
    assert_eq!(load_identity(&storage, DEFAULT_STORAGE_KEY).unwrap(), Some(ada()));
}

#[test]
fn load_identity_non_json_is_malformed() {
    let storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, "not json").unwrap();
    assert!(matches!(load_identity(&storage, DEFAULT_STORAGE_KEY), Err(StorageReadError::Malformed(_))));
}

#[test]
fn load_identity_missing_fields_is_malformed() {
    let storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, r#"{"id":"1"}"#).unwrap();
    assert!(matches!(load_identity(&storage, DEFAULT_STORAGE_KEY), Err(StorageReadError::Malformed(_))));
}

#[test]
fn load_identity_empty_name_is_invalid() {
    let storage = MemoryStorage::new();
    storage
        .set_item(DEFAULT_STORAGE_KEY, r#"{"id":"1","email":"a@b.c","name":""}"#)
        .unwrap();
    assert!(matches!(load_identity(&storage, DEFAULT_STORAGE_KEY), Err(StorageReadError::Invalid(_))));
}

#[test]
fn clear_identity_removes_record() {
    let storage = MemoryStorage::new();
    save_identity(&storage, DEFAULT_STORAGE_KEY, &ada()).unwrap();
    clear_identity(&storage, DEFAULT_STORAGE_KEY).unwrap();
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
}
