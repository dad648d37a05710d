//! JSON-file preference storage.

use super::{PreferenceStorage, StorageError};
use crate::consts::cli_consts::{APP_DIR_NAME, PREFERENCES_FILE_NAME};
use log::warn;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Resolves `~/.clinic-dash/preferences.json`.
pub fn get_preferences_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Failed to get home directory",
    ))?;
    Ok(home_path.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

/// Stores every key in one flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let buf = fs::read(&self.path)?;
        serde_json::from_slice(&buf).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load_entries()?.remove(key))
    }

    /// Directories are created if they don't exist. A corrupt file is
    /// replaced rather than blocking the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt { path, source }) => {
                warn!("Replacing corrupt preferences file {:?}: {}", path, source);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
