use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tasklist_core::{Mode, PersistenceAdapter, Task, TaskList, TaskListStore};
use tracing::debug;

use crate::config::confirm;
use crate::{Command, LsFormat};

/// Which tasks `ls` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}

impl ListFilter {
    pub const fn from_flags(pending: bool, completed: bool) -> Self {
        match (pending, completed) {
            (true, false) => Self::Pending,
            (false, true) => Self::Completed,
            _ => Self::All,
        }
    }

    const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Row of `ls --format json`. Positions are 1-based, as accepted by the
/// other commands.
#[derive(Debug, Serialize)]
struct ListedTask<'a> {
    index: usize,
    text: &'a str,
    completed: bool,
}

/// Execute a one-shot command against the store, writing feedback to `out`.
///
/// `input` is only read when a command needs confirmation.
pub fn run<P, R, W>(command: Command, store: &mut TaskListStore<P>, input: &mut R, out: &mut W) -> Result<()>
where
    P: PersistenceAdapter,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Add { text } => {
            let text = text.join(" ");
            let before = store.tasks().len();
            let list = store.add(&text).context("Failed to save the task list")?;
            if list.len() == before {
                writeln!(out, "Nothing to add: task text is blank")?;
            } else {
                let position = list.len();
                let added = describe(list, position - 1);
                writeln!(out, "Added task {position}: {added}")?;
            }
        }
        Command::Ls {
            format,
            pending,
            completed,
        } => {
            render_list(store.tasks(), format, ListFilter::from_flags(pending, completed), out)?;
        }
        Command::Edit { index, text } => {
            let position = resolve_index(store.tasks(), index)?;
            let text = text.join(" ");
            store.begin_edit(position);
            store.commit_edit(&text).context("Failed to save the task list")?;
            if matches!(store.mode(), Mode::Editing { .. }) {
                store.cancel_edit();
                writeln!(out, "Nothing changed: task text is blank")?;
            } else {
                let updated = describe(store.tasks(), position);
                writeln!(out, "Updated task {index}: {updated}")?;
            }
        }
        Command::Toggle { index } => {
            let position = resolve_index(store.tasks(), index)?;
            let list = store
                .toggle_completed(position)
                .context("Failed to save the task list")?;
            let verb = if list.get(position).is_some_and(|task| task.completed) {
                "Completed"
            } else {
                "Reopened"
            };
            let toggled = describe(list, position);
            writeln!(out, "{verb} task {index}: {toggled}")?;
        }
        Command::Rm { index } => {
            let position = resolve_index(store.tasks(), index)?;
            let removed = describe(store.tasks(), position);
            store.delete(position).context("Failed to save the task list")?;
            writeln!(out, "Deleted task {index}: {removed}")?;
        }
        Command::Clear { yes } => {
            let count = store.tasks().len();
            if count > 0 && !yes {
                write!(out, "Delete all {count} task(s)? [y/N]: ")?;
                out.flush()?;
                if !confirm(input)? {
                    writeln!(out, "Aborted.")?;
                    return Ok(());
                }
            }
            // An empty clear still rewrites the stored list, replacing unreadable data.
            store.delete_all().context("Failed to save the task list")?;
            if count == 0 {
                writeln!(out, "No tasks to delete")?;
            } else {
                writeln!(out, "Deleted {count} task(s)")?;
            }
        }
        Command::Tui { .. } | Command::Config { .. } => {
            bail!("command is not a one-shot task command");
        }
    }

    Ok(())
}

/// Convert a 1-based position from the command line into a list index.
fn resolve_index(tasks: &TaskList, index: usize) -> Result<usize> {
    let Some(position) = index.checked_sub(1) else {
        bail!("Task numbers start at 1");
    };
    let position = tasks
        .check_index(position)
        .with_context(|| format!("No task number {index}"))?;
    debug!(index, position, "Resolved task number");
    Ok(position)
}

fn describe(tasks: &TaskList, position: usize) -> String {
    tasks
        .get(position)
        .map_or_else(String::new, |task| task.text.clone())
}

fn render_list<W: Write>(tasks: &TaskList, format: LsFormat, filter: ListFilter, out: &mut W) -> Result<()> {
    let rows: Vec<(usize, &Task)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(position, task)| (position + 1, task))
        .collect();

    match format {
        LsFormat::Json => {
            let listed: Vec<ListedTask<'_>> = rows
                .iter()
                .map(|&(index, task)| ListedTask {
                    index,
                    text: &task.text,
                    completed: task.completed,
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&listed)?)?;
        }
        LsFormat::Table => {
            if rows.is_empty() {
                if filter == ListFilter::All {
                    writeln!(out, "No tasks found")?;
                } else {
                    writeln!(out, "No tasks matched the provided filter")?;
                }
                return Ok(());
            }
            let width = tasks.len().to_string().len().max(1);
            writeln!(out, "{:>width$} | Done | Task", "#")?;
            writeln!(out, "{:->width$} | ---- | ----", "")?;
            for (index, task) in rows {
                let mark = if task.completed { "[x]" } else { "[ ]" };
                writeln!(out, "{index:>width$} | {mark}  | {}", task.text)?;
            }
            writeln!(
                out,
                "\n{} task(s), {} completed",
                tasks.len(),
                tasks.completed_count()
            )?;
        }
    }
    Ok(())
}
