use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single to-do entry.
///
/// Tasks carry no identifier; a task is addressed by its position in the
/// [`TaskList`] that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Text shown to the user.
    pub text: String,
    /// Whether the task has been checked off.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an open task with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Copy of this task with its completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            text: self.text.clone(),
            completed: !self.completed,
        }
    }

    /// Copy of this task with new text and the same completion flag.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: self.completed,
        }
    }
}

/// Index supplied for a list that has no task at that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task index {index} is out of range for a list of {len} task(s)")]
pub struct IndexOutOfRange {
    /// Requested position (0-based).
    pub index: usize,
    /// Length of the list at the time of the request.
    pub len: usize,
}

/// Ordered snapshot of every task. Insertion order is display order.
///
/// Transformations never modify a list in place; each returns the next
/// snapshot and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    /// Empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Task at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    /// Iterate tasks in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Tasks as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|task| task.completed).count()
    }

    /// Number of tasks still open.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Validate a position before handing it to an operation that requires a
    /// valid index.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] when no task exists at `index`.
    pub const fn check_index(&self, index: usize) -> Result<usize, IndexOutOfRange> {
        if index < self.0.len() {
            Ok(index)
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }

    /// Next snapshot with `task` appended at the end.
    #[must_use]
    pub fn with_appended(&self, task: Task) -> Self {
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.extend_from_slice(&self.0);
        next.push(task);
        Self(next)
    }

    /// Next snapshot without the task at `index`; later tasks shift down by one.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn without(&self, index: usize) -> Self {
        self.assert_index(index, "delete");
        self.0
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, task)| task.clone())
            .collect()
    }

    /// Next snapshot with the completion flag at `index` flipped.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn with_toggled(&self, index: usize) -> Self {
        self.assert_index(index, "toggle");
        self.map_at(index, Task::toggled)
    }

    /// Next snapshot with the text at `index` replaced.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn with_text_at(&self, index: usize, text: &str) -> Self {
        self.assert_index(index, "update");
        self.map_at(index, |task| task.with_text(text))
    }

    fn map_at(&self, index: usize, f: impl Fn(&Task) -> Task) -> Self {
        self.0
            .iter()
            .enumerate()
            .map(|(i, task)| if i == index { f(task) } else { task.clone() })
            .collect()
    }

    fn assert_index(&self, index: usize, op: &str) {
        assert!(
            index < self.0.len(),
            "{op}: task index {index} is out of range for a list of {} task(s)",
            self.0.len()
        );
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {}", self.text)
    }
}
