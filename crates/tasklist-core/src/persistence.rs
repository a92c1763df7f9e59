use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::task::TaskList;

/// Key under which the whole list is stored.
pub const STORAGE_KEY: &str = "myList";

/// Backing store that survives across sessions.
///
/// The store only ever deals in whole snapshots: one value under
/// [`STORAGE_KEY`], overwritten on every save.
pub trait PersistenceAdapter {
    /// Error type bubbled up from the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the previously saved list.
    ///
    /// Absent or unparseable data yields an empty list rather than an error.
    fn load(&self) -> TaskList;

    /// Overwrite the stored list with `tasks`.
    ///
    /// # Errors
    /// Returns a store-specific error when the snapshot cannot be written.
    fn save(&self, tasks: &TaskList) -> Result<(), Self::Error>;
}

impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for &T {
    type Error = T::Error;

    fn load(&self) -> TaskList {
        (**self).load()
    }

    fn save(&self, tasks: &TaskList) -> Result<(), Self::Error> {
        (**self).save(tasks)
    }
}

/// Serialize a list into the stored form: a JSON array of
/// `{"text": .., "completed": ..}` records.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode(tasks: &TaskList) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parse the stored form produced by [`encode`].
///
/// # Errors
/// Returns an error when `raw` is not a JSON array of task records.
pub fn decode(raw: &str) -> Result<TaskList, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Decode an optional stored blob, degrading to an empty list when the blob
/// is missing or corrupt.
#[must_use]
pub fn decode_or_empty(raw: Option<&str>) -> TaskList {
    let Some(raw) = raw else {
        debug!(key = STORAGE_KEY, "No stored list, starting empty");
        return TaskList::new();
    };
    match decode(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(key = STORAGE_KEY, %err, "Stored list is unreadable, starting empty");
            TaskList::new()
        }
    }
}

/// In-memory adapter holding the encoded blob.
///
/// Clones share the same slot, so a test can keep one handle and inspect what
/// the store wrote through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw blob, as if an earlier session wrote it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// Raw blob currently stored, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PersistenceAdapter for MemoryStore {
    type Error = serde_json::Error;

    fn load(&self) -> TaskList {
        decode_or_empty(self.slot.borrow().as_deref())
    }

    fn save(&self, tasks: &TaskList) -> Result<(), Self::Error> {
        let encoded = encode(tasks)?;
        *self.slot.borrow_mut() = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn empty_store_loads_empty_list() {
        assert!(MemoryStore::new().load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() -> Result<(), serde_json::Error> {
        let store = MemoryStore::new();
        let list = TaskList::from(vec![
            Task::new("quotes \" and \\ backslashes"),
            Task::new("unicode ✓ 日本語 🥛").toggled(),
            Task::new("newline\nand\ttab"),
        ]);
        store.save(&list)?;
        assert_eq!(store.load(), list);
        Ok(())
    }

    #[test]
    fn empty_list_round_trips() -> Result<(), serde_json::Error> {
        let store = MemoryStore::with_raw(r#"[{"text":"x","completed":false}]"#);
        store.save(&TaskList::new())?;
        assert_eq!(store.raw().as_deref(), Some("[]"));
        assert!(store.load().is_empty());
        Ok(())
    }

    #[test]
    fn corrupt_blob_degrades_to_empty() {
        assert!(MemoryStore::with_raw("{not json").load().is_empty());
        assert!(MemoryStore::with_raw(r#"{"text":"object"}"#).load().is_empty());
    }

    #[test]
    fn reads_the_browser_storage_format() {
        let raw = r#"[{"text":"buy milk","completed":true},{"text":"walk dog","completed":false}]"#;
        let list = MemoryStore::with_raw(raw).load();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&Task::new("buy milk").toggled()));
        assert_eq!(list.get(1), Some(&Task::new("walk dog")));
    }

    #[test]
    fn missing_completed_flag_defaults_to_open() -> Result<(), serde_json::Error> {
        let list = decode(r#"[{"text":"legacy"}]"#)?;
        assert_eq!(list.get(0), Some(&Task::new("legacy")));
        Ok(())
    }

    #[test]
    fn encode_uses_field_names() -> Result<(), serde_json::Error> {
        let encoded = encode(&TaskList::from(vec![Task::new("a")]))?;
        assert_eq!(encoded, r#"[{"text":"a","completed":false}]"#);
        Ok(())
    }

    #[test]
    fn clones_share_the_slot() -> Result<(), serde_json::Error> {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.save(&TaskList::from(vec![Task::new("shared")]))?;
        assert_eq!(handle.load().len(), 1);
        Ok(())
    }
}
