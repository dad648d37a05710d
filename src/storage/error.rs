//! Error handling for preference storage

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached at all.
    #[error("Preference storage unavailable")]
    Unavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The preferences file exists but is not a JSON object of strings.
    #[error("Corrupt preferences file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
