//! File-backed key-value store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] with one file per key under a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written collection. Storage keys are plain
/// camelCase identifiers and map directly to `<key>.json` filenames.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteRejected`] if the directory cannot be
    /// created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| StorageError::WriteRejected {
            key: dir.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// The data directory this store writes under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::ReadFailed {
                key: key.to_owned(),
                reason: err.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        let write = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        write.map_err(|err| StorageError::WriteRejected {
            key: key.to_owned(),
            reason: err.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::WriteRejected {
                key: key.to_owned(),
                reason: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get(keys::CART).unwrap(), None);
        store.set(keys::CART, "[]").unwrap();
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[]"));

        // survives reopening
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.remove("nothing").is_ok());
    }
}
