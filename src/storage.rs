//! Durable key-value storage seam for the persisted identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browsers back this with `localStorage` (see the client's
//! `BrowserStorage`); tests use `MemoryStorage`. The store only ever
//! touches one key, holding the identity as JSON.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{StorageError, StorageReadError, StorageWriteError};
use crate::identity::Identity;

/// Default storage key for the persisted identity.
pub const DEFAULT_STORAGE_KEY: &str = "careerforge_user";

/// String key-value storage shaped like browser `localStorage`.
pub trait SessionStorage: Send + Sync {
    /// Read the value for `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same map, so a clone handed to a
/// second store simulates a page reload over the same origin.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

/// Read the identity stored under `key`.
///
/// # Errors
///
/// Distinguishes unreadable storage, non-JSON data, and records that parse
/// but break the identity invariant.
pub fn load_identity(storage: &dyn SessionStorage, key: &str) -> Result<Option<Identity>, StorageReadError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    let identity: Identity = serde_json::from_str(&raw)?;
    identity.validate()?;
    Ok(Some(identity))
}

/// Persist `identity` under `key` as JSON.
///
/// # Errors
///
/// Returns an error if serialization or the storage write fails.
pub fn save_identity(storage: &dyn SessionStorage, key: &str, identity: &Identity) -> Result<(), StorageWriteError> {
    let raw = serde_json::to_string(identity)?;
    storage.set_item(key, &raw)?;
    Ok(())
}

/// Remove the persisted identity under `key`.
///
/// # Errors
///
/// Returns an error if the storage cannot be modified.
pub fn clear_identity(storage: &dyn SessionStorage, key: &str) -> Result<(), StorageError> {
    storage.remove_item(key)
}
