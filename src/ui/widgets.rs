//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that keeps the selected item in view
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Left-align `text` in a column of `width` characters, cutting it with an ellipsis
pub fn column(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Dim "label: " span used in detail views
pub fn label_span(label: &str) -> Span<'static> {
    Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray))
}

/// Paragraph scroll for a body of `line_count` lines, keeping the last line reachable
pub fn scroll_position(offset: usize, line_count: usize) -> u16 {
    let offset = offset.min(line_count.saturating_sub(1));
    u16::try_from(offset).unwrap_or(u16::MAX)
}
