use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tasklist_core::{Mode, PersistenceAdapter};

use super::super::constants::INPUT_PLACEHOLDER;
use super::super::view::{Focus, Ui};
use crate::config::{Action, ViewType};

impl<P: PersistenceAdapter> Ui<P> {
    /// Draft line; the title names the task under edit and the primary action.
    pub(in crate::tui) fn draw_input(&self, f: &mut Frame<'_>, area: Rect) {
        let mode = self.store.mode();
        let title = match mode {
            Mode::Composing => "New task".to_string(),
            Mode::Editing { index } => format!("Editing task {}", index + 1),
        };
        let submit_key = self.keybindings.first_key_label(ViewType::Input, Action::Submit);
        let action = format!(" {submit_key} {} ", mode.primary_label());

        let focused = self.focus == Focus::Input;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(title)
            .title_top(Line::from(action).right_aligned())
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        let draft = self.store.draft();
        let line = if draft.is_empty() {
            Line::from(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(draft)
        };
        f.render_widget(Paragraph::new(line).block(block), area);

        if focused && inner.width > 0 {
            let typed = u16::try_from(Line::from(draft).width()).unwrap_or(u16::MAX);
            let x = inner.x + typed.min(inner.width - 1);
            f.set_cursor_position(Position::new(x, inner.y));
        }
    }
}
