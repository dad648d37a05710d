//! Durable key-value storage for user preferences

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::{JsonFileStorage, get_preferences_path};
pub use memory::MemoryStorage;

/// A string-to-string slot store that survives restarts within one scope.
///
/// Implementations take `&self`; the preference store is single-threaded and
/// backends keep any mutable state behind interior mutability.
pub trait PreferenceStorage {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
