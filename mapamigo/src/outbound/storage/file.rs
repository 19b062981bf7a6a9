//! File-backed key-value store adapter.
//!
//! Each key is stored as one JSON document inside a capability-scoped
//! directory. Writes go through a staged file and rename so a crash never
//! leaves a half-written document behind.

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use uuid::Uuid;

use crate::domain::ports::{KeyValueStore, StorageError};

/// Store that keeps one `<key>.json` file per key inside its directory.
///
/// The directory handle is capability-scoped, so key names cannot reach
/// outside the storage directory. Access is serialised through a mutex,
/// matching the in-memory adapter.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Mutex<Dir>,
}

impl FileKeyValueStore {
    /// Open the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|error| StorageError::io(format!("create {}: {error}", path.display())))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|error| StorageError::io(format!("open {}: {error}", path.display())))?;
        Ok(Self {
            dir: Mutex::new(dir),
        })
    }

    fn dir(&self) -> Result<MutexGuard<'_, Dir>, StorageError> {
        self.dir
            .lock()
            .map_err(|_| StorageError::backend("storage directory lock poisoned"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let dir = self.dir()?;
        match dir.read_to_string(document_name(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::io(format!("read {key}: {error}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir()?;
        let target = document_name(key);
        let staged = format!(".{target}.tmp-{}", Uuid::new_v4().simple());
        write_staged(&dir, &staged, value)
            .map_err(|error| StorageError::io(format!("write {key}: {error}")))?;
        if let Err(error) = replace_document(&dir, &staged, &target) {
            drop(dir.remove_file(&staged));
            return Err(StorageError::io(format!("replace {key}: {error}")));
        }
        sync_directory(&dir);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let dir = self.dir()?;
        match dir.remove_file(document_name(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::io(format!("remove {key}: {error}"))),
        }
    }
}

fn document_name(key: &str) -> String {
    format!("{key}.json")
}

fn write_staged(dir: &Dir, staged: &str, value: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(staged, &options)?;
    if let Err(error) = file.write_all(value.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        drop(dir.remove_file(staged));
        return Err(error);
    }
    Ok(())
}

#[cfg(windows)]
fn replace_document(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    dir.rename(staged, dir, target)
}

#[cfg(not(windows))]
fn replace_document(dir: &Dir, staged: &str, target: &str) -> io::Result<()> {
    dir.rename(staged, dir, target)
}

fn sync_directory(dir: &Dir) {
    // Best effort; a missed sync only widens the crash window.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
