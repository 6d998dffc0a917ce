//! Multi-step create wizard

use super::field_renderer::{draw_fields, image_status_line};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::forms::{product_fields, Form};
use crate::state::CreateFlow;
use crate::ui::components::{render_button, ButtonStyle, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the create wizard for the current flow
pub fn draw_create(frame: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = app.state.create_flow.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", app.state.current_view.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shows_image = flow.step_fields().contains(&product_fields::IMAGE);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                                 // Progress
            Constraint::Min(3),                                    // Fields
            Constraint::Length(u16::from(shows_image)),            // Upload status
            Constraint::Length(BUTTON_HEIGHT),                     // Buttons
        ])
        .horizontal_margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(progress_line(flow)), chunks[0]);
    draw_fields(
        frame,
        chunks[1],
        flow.form(),
        flow.step_fields(),
        flow.active_field(),
    );
    if shows_image {
        frame.render_widget(
            Paragraph::new(image_status_line(flow.form(), flow.uploading)),
            chunks[2],
        );
    }
    draw_buttons(frame, chunks[3], flow);
}

/// Step dots followed by "Step i of n: label"
fn progress_line(flow: &CreateFlow) -> Line<'static> {
    let wizard = flow.wizard();
    let mut spans = Vec::with_capacity(wizard.step_count() + 1);

    for (idx, _) in wizard.steps().iter().enumerate() {
        let (symbol, color) = match idx.cmp(&wizard.index()) {
            std::cmp::Ordering::Less => ("● ", Color::Green),
            std::cmp::Ordering::Equal => ("● ", Color::Cyan),
            std::cmp::Ordering::Greater => ("○ ", Color::DarkGray),
        };
        spans.push(Span::styled(symbol, Style::default().fg(color)));
    }

    spans.push(Span::styled(
        format!(
            " Step {} of {}: {}",
            wizard.index() + 1,
            wizard.step_count(),
            wizard.current_step().label
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    Line::from(spans)
}

fn draw_buttons(frame: &mut Frame, area: Rect, flow: &CreateFlow) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(0),
            Constraint::Length(24),
            Constraint::Length(16),
        ])
        .split(area);

    let wizard = flow.wizard();

    let back_style = if wizard.is_first() {
        ButtonStyle::Disabled
    } else {
        ButtonStyle::Secondary
    };
    render_button(frame, chunks[0], "Back", "PgUp", back_style);

    let (label, style) = if wizard.is_busy() {
        ("Checking...", ButtonStyle::Dimmed)
    } else if wizard.is_last() && flow.uploading {
        ("Uploading...", ButtonStyle::Dimmed)
    } else if wizard.is_last() {
        ("Publish", ButtonStyle::Primary)
    } else if flow.next_ready() {
        ("Next", ButtonStyle::Primary)
    } else {
        ("Next", ButtonStyle::Dimmed)
    };
    render_button(frame, chunks[2], label, SAVE_SHORTCUT, style);
    render_button(frame, chunks[3], "Cancel", "Esc", ButtonStyle::Secondary);
}
