//! In-memory preference storage.

use super::{PreferenceStorage, StorageError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Non-durable storage, used when no home directory can be resolved and by
/// tests. Clones share the same slots, so a second store built on a clone
/// sees what the first one wrote.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            available: Rc::new(Cell::new(true)),
        }
    }

    /// Storage that fails every read and write, like a disabled backend.
    #[cfg(test)]
    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.set_available(false);
        storage
    }

    #[cfg(test)]
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available.get() {
            return Err(StorageError::Unavailable);
        }
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        storage.write("k", "v").unwrap();
        assert_eq!(clone.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_unavailable_storage_rejects_access() {
        let storage = MemoryStorage::unavailable();
        assert!(matches!(storage.read("k"), Err(StorageError::Unavailable)));
        assert!(matches!(storage.write("k", "v"), Err(StorageError::Unavailable)));
    }
}
