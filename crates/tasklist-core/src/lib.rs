//! Core model for tasklist: the task list, its edit state and the
//! persistence seam.

/// Persistence adapter trait, the stored JSON format and an in-memory adapter.
pub mod persistence;
/// The store that owns the list, the edit cursor and the draft buffer.
pub mod store;
/// Task records and list snapshots.
pub mod task;

pub use persistence::{MemoryStore, PersistenceAdapter, STORAGE_KEY};
pub use store::{Mode, TaskListStore};
pub use task::{IndexOutOfRange, Task, TaskList};
