//! Toast-style notifications in the top-right corner

use crate::state::{NotificationLevel, Notifications};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 44;

/// Stack live notifications below each other, newest at the bottom
pub fn render_notifications(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y;

    for note in notifications.iter() {
        let height = if note.detail.is_some() { 4 } else { 3 };
        if y + height > area.y + area.height {
            break;
        }

        let color = match note.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Error => Color::Red,
        };

        let mut lines = vec![Line::from(Span::styled(
            note.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = &note.detail {
            lines.push(Line::from(Span::styled(
                detail.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }

        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width),
            y,
            width,
            height,
        };
        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(Color::Black)),
            ),
            toast_area,
        );

        y += height;
    }
}
