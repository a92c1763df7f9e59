use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use tasklist_core::{PersistenceAdapter, TaskListStore};

use super::constants::UI_MESSAGE_TTL_SECS;
use crate::config::{KeyBindingsConfig, ViewType};

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    /// Input line: typing edits the draft.
    Input,
    /// Task list: keys move the selection and act on the selected task.
    List,
}

pub(super) struct Ui<P: PersistenceAdapter> {
    pub(super) store: TaskListStore<P>,
    pub(super) focus: Focus,
    /// Selected row in the list; clamped to the list on every read.
    pub(super) selected: usize,
    /// Set after the first delete-all press; any other key clears it.
    pub(super) confirm_delete_all: bool,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) keybindings: KeyBindingsConfig,
}

impl<P: PersistenceAdapter> Ui<P> {
    pub(super) const INPUT_HEIGHT: u16 = 3;
    pub(super) const LIST_MIN_HEIGHT: u16 = 3;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_HEIGHT: u16 = 3;

    pub(super) fn new(store: TaskListStore<P>, keybindings: KeyBindingsConfig) -> Self {
        Self {
            store,
            focus: Focus::Input,
            selected: 0,
            confirm_delete_all: false,
            message: None,
            should_quit: false,
            keybindings,
        }
    }

    pub(super) const fn view_type(&self) -> ViewType {
        match self.focus {
            Focus::Input => ViewType::Input,
            Focus::List => ViewType::TaskList,
        }
    }

    /// Index of the highlighted task, if the list has any.
    pub(super) fn selected_index(&self) -> Option<usize> {
        let len = self.store.tasks().len();
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::INPUT_HEIGHT),
                Constraint::Min(Self::LIST_MIN_HEIGHT),
                Constraint::Length(Self::INSTRUCTIONS_HEIGHT + Self::STATUS_MESSAGE_HEIGHT),
            ])
            .split(size);

        self.draw_input(f, chunks[0]);
        self.draw_task_list(f, chunks[1]);
        self.draw_status(f, chunks[2]);
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
