use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasklist_core::{Mode, PersistenceAdapter};

use super::super::view::{Focus, Ui};
use super::super::widgets::util::pop_grapheme;
use crate::config::{Action, ViewType};

impl<P: PersistenceAdapter> Ui<P> {
    pub(in crate::tui) fn handle_input_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.keybindings.matches(ViewType::Input, Action::Submit, &key) {
            return self.submit_draft();
        }

        if self.keybindings.matches(ViewType::Input, Action::Cancel, &key) {
            self.cancel_input();
            return Ok(());
        }

        if self
            .keybindings
            .matches(ViewType::Input, Action::SwitchFocus, &key)
        {
            self.focus = Focus::List;
            return Ok(());
        }

        match key.code {
            KeyCode::Backspace => pop_grapheme(self.store.draft_mut()),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.store.draft_mut().push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_draft(&mut self) -> Result<()> {
        let mode = self.store.mode();
        let before = self.store.tasks().len();
        self.store.submit()?;

        match mode {
            Mode::Composing => {
                let len = self.store.tasks().len();
                if len > before {
                    self.selected = len - 1;
                    self.info(format!("Added task {len}"));
                } else {
                    self.error("Type a task first");
                }
            }
            Mode::Editing { index } => {
                if self.store.mode() == mode {
                    self.error("Task text cannot be blank");
                } else {
                    self.selected = index;
                    self.focus = Focus::List;
                    self.info(format!("Updated task {}", index + 1));
                }
            }
        }
        Ok(())
    }

    fn cancel_input(&mut self) {
        if matches!(self.store.mode(), Mode::Editing { .. }) {
            self.store.cancel_edit();
            self.info("Edit cancelled");
        }
        self.focus = Focus::List;
    }
}
