//! Error types for tasklist file store operations.

use thiserror::Error;

/// Errors that can occur during `FileStore` operations.
#[derive(Error, Debug)]
pub enum FileStoreError {
    /// Key cannot be mapped to a file inside the data directory.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Failed to serialize the task list.
    #[error("Failed to serialize task list: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to move the freshly written file into place.
    #[error("Failed to replace {path}: {source}")]
    PersistError {
        /// Destination that could not be replaced.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
