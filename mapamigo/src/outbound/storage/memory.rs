//! In-memory key-value store adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{KeyValueStore, StorageError};

/// Process-local store backed by a mutex-guarded map. Starts empty.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::backend("key-value state lock poisoned"))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
