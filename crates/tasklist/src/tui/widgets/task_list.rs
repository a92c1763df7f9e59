use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tasklist_core::{PersistenceAdapter, Task};
use unicode_segmentation::UnicodeSegmentation;

use super::super::constants::{COMPLETED_MARKER, EDITING_MARKER, PENDING_MARKER, TASK_LIST_HIGHLIGHT_SYMBOL};
use super::super::view::{Focus, Ui};
use super::util::truncate_with_ellipsis;
use crate::config::{Action, ViewType};

impl<P: PersistenceAdapter> Ui<P> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let tasks = self.store.tasks();
        let editing = self.store.edit_cursor();
        let text_width = usize::from(area.width).saturating_sub(
            2 + TASK_LIST_HIGHLIGHT_SYMBOL.graphemes(true).count()
                + COMPLETED_MARKER.len()
                + EDITING_MARKER.graphemes(true).count(),
        );

        let items: Vec<ListItem<'_>> = if tasks.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No tasks yet",
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            tasks
                .iter()
                .enumerate()
                .map(|(index, task)| task_row(task, text_width, editing == Some(index)))
                .collect()
        };

        let title = format!(
            "Tasks ({} open, {} done)",
            tasks.pending_count(),
            tasks.completed_count()
        );
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if self.focus == Focus::List {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        if !tasks.is_empty() {
            let key = self
                .keybindings
                .first_key_label(ViewType::TaskList, Action::DeleteAll);
            block = block.title_bottom(Line::from(format!(" {key}: Delete all ")).right_aligned());
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.focus == Focus::List {
            state.select(self.selected_index());
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn task_row(task: &Task, text_width: usize, editing: bool) -> ListItem<'_> {
    let (marker, text_style) = if task.completed {
        (
            COMPLETED_MARKER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (PENDING_MARKER, Style::default())
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(truncate_with_ellipsis(&task.text, text_width), text_style),
    ];
    if editing {
        spans.push(Span::styled(EDITING_MARKER, Style::default().fg(Color::Yellow)));
    }
    ListItem::new(Line::from(spans))
}
