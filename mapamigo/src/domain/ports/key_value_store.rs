//! Port for the flat key-value store backing accounts and contacts.

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum StorageError {
        /// Reading or writing the backing medium failed.
        Io { message: String } => "key-value store I/O failed: {message}",
        /// The adapter itself is unusable, such as a poisoned lock.
        Backend { message: String } => "key-value store backend failed: {message}",
    }
}

/// Port for the flat string store the services persist JSON documents in.
///
/// Keys are opaque UTF-8 strings and values are whatever the caller
/// serialised. Operations are synchronous; adapters that need I/O keep it
/// short and local.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureKeyValueStore;

impl KeyValueStore for FixtureKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
