//! Filesystem-backed storage implementation for tasklist.

mod error;

pub use error::FileStoreError;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tasklist_core::persistence::{decode_or_empty, encode};
use tasklist_core::{PersistenceAdapter, STORAGE_KEY, TaskList};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const VALUE_EXTENSION: &str = "json";

/// Key/value blob store where each key is one file under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, FileStoreError> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that backs `key`.
    ///
    /// # Errors
    /// Returns [`FileStoreError::InvalidKey`] for keys that are empty or would
    /// escape the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, FileStoreError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');
        if !valid {
            return Err(FileStoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or the file exists but cannot be
    /// read.
    pub fn read(&self, key: &str) -> Result<Option<String>, FileStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Atomically replace the value stored under `key`.
    ///
    /// The value is written to a temporary file in the same directory and
    /// renamed over the target.
    ///
    /// # Errors
    /// Returns an error if the key is invalid or any filesystem step fails.
    pub fn write(&self, key: &str, value: &str) -> Result<(), FileStoreError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| FileStoreError::PersistError {
            path: path.display().to_string(),
            source: err.error,
        })?;
        Ok(())
    }
}

impl PersistenceAdapter for FileStore {
    type Error = FileStoreError;

    fn load(&self) -> TaskList {
        match self.read(STORAGE_KEY) {
            Ok(raw) => decode_or_empty(raw.as_deref()),
            Err(err) => {
                warn!(root = %self.root.display(), %err, "Failed to read stored list, starting empty");
                TaskList::new()
            }
        }
    }

    fn save(&self, tasks: &TaskList) -> Result<(), Self::Error> {
        let encoded = encode(tasks)?;
        self.write(STORAGE_KEY, &encoded)?;
        info!(root = %self.root.display(), len = tasks.len(), "Wrote task list");
        Ok(())
    }
}
