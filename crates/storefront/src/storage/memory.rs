//! In-memory key-value store.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::{KeyValueStore, StorageError};

/// A `HashMap`-backed [`KeyValueStore`].
///
/// Used for ephemeral sessions and as the test double for storage-failure
/// paths: [`MemoryStore::set_fail_writes`] makes every subsequent write fail
/// the way a quota-exhausted store would, and
/// [`MemoryStore::set_fail_writes_for`] fails a single key so a
/// multi-key protocol can be caught halfway through. Both are how the
/// reconciler's rollback protocol gets exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
    fail_keys: RefCell<HashSet<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force every subsequent write to fail (quota simulation).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Force writes to one key to fail while other keys stay writable.
    pub fn set_fail_writes_for(&self, key: &str) {
        self.fail_keys.borrow_mut().insert(key.to_owned());
    }

    /// Lift a per-key failure set by [`Self::set_fail_writes_for`].
    pub fn clear_fail_writes_for(&self, key: &str) {
        self.fail_keys.borrow_mut().remove(key);
    }

    fn rejects(&self, key: &str) -> bool {
        self.fail_writes.get() || self.fail_keys.borrow().contains(key)
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.rejects(key) {
            return Err(StorageError::WriteRejected {
                key: key.to_owned(),
                reason: "simulated quota exceeded".to_owned(),
            });
        }
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.rejects(key) {
            return Err(StorageError::WriteRejected {
                key: key.to_owned(),
                reason: "simulated quota exceeded".to_owned(),
            });
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_fail_writes_leaves_existing_value() {
        let store = MemoryStore::new();
        store.set("cart", "[]").unwrap();

        store.set_fail_writes(true);
        assert!(store.set("cart", "[1]").is_err());
        // reads still work and see the old value
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.set_fail_writes(false);
        store.set("cart", "[1]").unwrap();
    }

    #[test]
    fn test_per_key_failure_leaves_other_keys_writable() {
        let store = MemoryStore::new();
        store.set_fail_writes_for("cart");

        assert!(store.set("cart", "[]").is_err());
        store.set("catalog", "[]").unwrap();

        store.clear_fail_writes_for("cart");
        store.set("cart", "[]").unwrap();
    }
}
