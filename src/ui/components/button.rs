//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Visual state of a wizard button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Primary action (Next, Publish, Save)
    Primary,
    /// Secondary action (Back, Cancel)
    Secondary,
    /// Shown but dimmed; pressing it may still do something
    Dimmed,
    /// Not available at all
    Disabled,
}

/// Render a bordered button with a key hint, e.g. `Next (PgDn)`
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    key_hint: &str,
    style: ButtonStyle,
) {
    let (border, text) = match style {
        ButtonStyle::Primary => (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        ButtonStyle::Secondary => (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::White),
        ),
        ButtonStyle::Dimmed => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        ),
        ButtonStyle::Disabled => (
            Style::default().fg(Color::Black),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ),
    };

    let content = if key_hint.is_empty() {
        label.to_string()
    } else {
        format!("{label} ({key_hint})")
    };

    let paragraph = Paragraph::new(content)
        .style(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));

    frame.render_widget(paragraph, area);
}
