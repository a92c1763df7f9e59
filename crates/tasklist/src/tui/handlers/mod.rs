use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use tasklist_core::PersistenceAdapter;

use super::view::{Focus, Ui};
use crate::config::Action;

pub(super) mod input;
pub(super) mod list;

impl<P: PersistenceAdapter> Ui<P> {
    /// Route a key press to the focused pane.
    ///
    /// Errors come from the store; the caller shows them as status messages.
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.keybindings.matches(self.view_type(), Action::Quit, &key) {
            self.should_quit = true;
            return Ok(());
        }

        let confirm_delete_all = std::mem::take(&mut self.confirm_delete_all);
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key, confirm_delete_all),
        }
    }
}
