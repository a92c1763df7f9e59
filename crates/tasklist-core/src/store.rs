use tracing::{debug, info};

use crate::persistence::PersistenceAdapter;
use crate::task::{Task, TaskList};

/// Whether the primary action adds a new task or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No task is being edited; the primary action appends the draft.
    Composing,
    /// The task at `index` is being edited; the primary action rewrites it.
    Editing {
        /// Position of the task under edit.
        index: usize,
    },
}

impl Mode {
    /// Label for the primary button in this mode.
    #[must_use]
    pub const fn primary_label(self) -> &'static str {
        match self {
            Self::Composing => "Add",
            Self::Editing { .. } => "Update",
        }
    }
}

/// Owner of the task list, the edit cursor and the draft buffer.
///
/// Every operation that changes the list replaces the current snapshot and
/// saves it through the adapter before returning it.
pub struct TaskListStore<P> {
    adapter: P,
    tasks: TaskList,
    edit_cursor: Option<usize>,
    draft: String,
}

impl<P: PersistenceAdapter> TaskListStore<P> {
    /// Open a store seeded with whatever the adapter has saved.
    pub fn open(adapter: P) -> Self {
        let tasks = adapter.load();
        debug!(len = tasks.len(), "Loaded task list");
        Self {
            adapter,
            tasks,
            edit_cursor: None,
            draft: String::new(),
        }
    }

    /// Current snapshot.
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Index of the task under edit.
    pub const fn edit_cursor(&self) -> Option<usize> {
        self.edit_cursor
    }

    /// Compose/edit mode derived from the edit cursor.
    pub const fn mode(&self) -> Mode {
        match self.edit_cursor {
            Some(index) => Mode::Editing { index },
            None => Mode::Composing,
        }
    }

    /// Pending input text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the pending input text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Mutable access to the pending input text for character-level editing.
    pub const fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Backing adapter.
    pub const fn adapter(&self) -> &P {
        &self.adapter
    }

    /// Append `draft` as a new open task and clear the draft buffer.
    ///
    /// Blank input is ignored: the list is returned unchanged and nothing is
    /// saved.
    ///
    /// # Errors
    /// Returns the adapter error if the new snapshot cannot be saved.
    pub fn add(&mut self, draft: &str) -> Result<&TaskList, P::Error> {
        let text = draft.trim();
        if text.is_empty() {
            debug!("Ignoring blank task");
            return Ok(&self.tasks);
        }
        let next = self.tasks.with_appended(Task::new(text));
        self.draft.clear();
        self.replace(next, "add")
    }

    /// Start editing the task at `index`, copying its text into the draft.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn begin_edit(&mut self, index: usize) -> &str {
        let Some(task) = self.tasks.get(index) else {
            panic!(
                "begin_edit: task index {index} is out of range for a list of {} task(s)",
                self.tasks.len()
            );
        };
        self.draft.clone_from(&task.text);
        self.edit_cursor = Some(index);
        debug!(index, "Editing task");
        &self.draft
    }

    /// Replace the text of the task under edit with the trimmed `draft`.
    ///
    /// Ignored when nothing is being edited or `draft` is blank; the editing
    /// state is kept in the latter case.
    ///
    /// # Errors
    /// Returns the adapter error if the new snapshot cannot be saved.
    pub fn commit_edit(&mut self, draft: &str) -> Result<&TaskList, P::Error> {
        let Some(index) = self.edit_cursor else {
            debug!("No task under edit, ignoring commit");
            return Ok(&self.tasks);
        };
        let text = draft.trim();
        if text.is_empty() {
            debug!(index, "Ignoring blank edit");
            return Ok(&self.tasks);
        }
        let next = self.tasks.with_text_at(index, text);
        self.edit_cursor = None;
        self.draft.clear();
        self.replace(next, "update")
    }

    /// Leave editing mode without touching the list.
    pub fn cancel_edit(&mut self) {
        if self.edit_cursor.take().is_some() {
            self.draft.clear();
            debug!("Edit cancelled");
        }
    }

    /// Remove the task at `index`.
    ///
    /// If the task under edit is removed or shifted by the removal, editing
    /// is abandoned and the draft cleared.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    ///
    /// # Errors
    /// Returns the adapter error if the new snapshot cannot be saved.
    pub fn delete(&mut self, index: usize) -> Result<&TaskList, P::Error> {
        let next = self.tasks.without(index);
        if let Some(cursor) = self.edit_cursor
            && index <= cursor
        {
            self.edit_cursor = None;
            self.draft.clear();
        }
        self.replace(next, "delete")
    }

    /// Flip the completion flag of the task at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    ///
    /// # Errors
    /// Returns the adapter error if the new snapshot cannot be saved.
    pub fn toggle_completed(&mut self, index: usize) -> Result<&TaskList, P::Error> {
        let next = self.tasks.with_toggled(index);
        self.replace(next, "toggle")
    }

    /// Drop every task, the edit cursor and the draft.
    ///
    /// # Errors
    /// Returns the adapter error if the empty snapshot cannot be saved.
    pub fn delete_all(&mut self) -> Result<&TaskList, P::Error> {
        self.edit_cursor = None;
        self.draft.clear();
        self.replace(TaskList::new(), "delete_all")
    }

    /// Primary action: add the draft when composing, commit it when editing.
    ///
    /// # Errors
    /// Returns the adapter error if the new snapshot cannot be saved.
    pub fn submit(&mut self) -> Result<&TaskList, P::Error> {
        let draft = self.draft.clone();
        match self.mode() {
            Mode::Composing => self.add(&draft),
            Mode::Editing { .. } => self.commit_edit(&draft),
        }
    }

    fn replace(&mut self, next: TaskList, op: &'static str) -> Result<&TaskList, P::Error> {
        self.tasks = next;
        self.adapter.save(&self.tasks)?;
        info!(op, len = self.tasks.len(), "Saved task list");
        Ok(&self.tasks)
    }
}
