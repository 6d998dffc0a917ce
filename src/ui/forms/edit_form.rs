//! Single-page edit forms for existing records

use super::field_renderer::{draw_fields, image_status_line};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::forms::Form;
use crate::state::records::format_day;
use crate::state::RecordKind;
use crate::ui::components::{render_button, ButtonStyle, BUTTON_HEIGHT};
use crate::ui::widgets::label_span;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the edit form for the current session
pub fn draw_edit(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.edit_session.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", app.state.current_view.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let is_product = session.kind == RecordKind::Product;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                       // Read-only header
            Constraint::Min(3),                          // Fields
            Constraint::Length(u16::from(is_product)),   // Upload status
            Constraint::Length(BUTTON_HEIGHT),           // Buttons
        ])
        .horizontal_margin(1)
        .split(inner);

    // Identifiers that cannot be changed
    let mut header = Vec::new();
    if let Some(order_id) = &session.order_id {
        header.push(label_span("Order ID"));
        header.push(Span::styled(order_id.clone(), Style::default().fg(Color::Cyan)));
        header.push(Span::raw("  "));
    }
    header.push(label_span("Created"));
    header.push(Span::raw(format_day(&session.created_at)));
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    let names: Vec<&'static str> = session.form.fields().iter().map(|f| f.name).collect();
    draw_fields(frame, chunks[1], &session.form, &names, session.active_field());

    if is_product {
        frame.render_widget(
            Paragraph::new(image_status_line(&session.form, session.uploading)),
            chunks[2],
        );
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(22),
            Constraint::Length(16),
        ])
        .split(chunks[3]);

    let (label, style) = if session.uploading {
        ("Uploading...", ButtonStyle::Dimmed)
    } else {
        ("Save", ButtonStyle::Primary)
    };
    render_button(frame, buttons[1], label, SAVE_SHORTCUT, style);
    render_button(frame, buttons[2], "Cancel", "Esc", ButtonStyle::Secondary);
}
