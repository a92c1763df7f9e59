use anyhow::Result;
use crossterm::event::KeyEvent;
use tasklist_core::PersistenceAdapter;

use super::super::view::{Focus, Ui};
use crate::config::{Action, ViewType};

impl<P: PersistenceAdapter> Ui<P> {
    pub(in crate::tui) fn handle_list_key(&mut self, key: KeyEvent, confirm_delete_all: bool) -> Result<()> {
        if self.keybindings.matches(ViewType::TaskList, Action::Down, &key) {
            self.select_next();
            return Ok(());
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Up, &key) {
            self.select_prev();
            return Ok(());
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::Compose, &key)
        {
            self.focus = Focus::Input;
            return Ok(());
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::Toggle, &key)
        {
            return self.toggle_selected();
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Edit, &key) {
            self.edit_selected();
            return Ok(());
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::Delete, &key)
        {
            return self.delete_selected();
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::DeleteAll, &key)
        {
            return self.delete_all(confirm_delete_all);
        }

        Ok(())
    }

    fn select_next(&mut self) {
        if let Some(index) = self.selected_index() {
            let last = self.store.tasks().len() - 1;
            self.selected = (index + 1).min(last);
        }
    }

    fn select_prev(&mut self) {
        if let Some(index) = self.selected_index() {
            self.selected = index.saturating_sub(1);
        }
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(index) = self.selected_index() else {
            self.error("No task selected");
            return Ok(());
        };
        let tasks = self.store.toggle_completed(index)?;
        let verb = if tasks.as_slice()[index].completed {
            "Completed"
        } else {
            "Reopened"
        };
        self.info(format!("{verb} task {}", index + 1));
        Ok(())
    }

    fn edit_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            self.error("No task selected");
            return;
        };
        self.store.begin_edit(index);
        self.focus = Focus::Input;
        self.info(format!("Editing task {}", index + 1));
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(index) = self.selected_index() else {
            self.error("No task selected");
            return Ok(());
        };
        let remaining = self.store.delete(index)?.len();
        self.selected = index.min(remaining.saturating_sub(1));
        self.info(format!("Deleted task {}", index + 1));
        Ok(())
    }

    fn delete_all(&mut self, confirmed: bool) -> Result<()> {
        let count = self.store.tasks().len();
        if count == 0 {
            return Ok(());
        }
        if !confirmed {
            self.confirm_delete_all = true;
            let key = self
                .keybindings
                .first_key_label(ViewType::TaskList, Action::DeleteAll);
            self.info(format!("Press {key} again to delete all {count} task(s)"));
            return Ok(());
        }
        self.store.delete_all()?;
        self.selected = 0;
        self.info(format!("Deleted {count} task(s)"));
        Ok(())
    }
}
