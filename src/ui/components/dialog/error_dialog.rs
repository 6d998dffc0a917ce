//! Modal dialog for errors that need acknowledgement

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{style::Color, text::Span, Frame};

/// Render the front error; `queued` errors are waiting behind it
pub fn render_error_dialog(frame: &mut Frame, message: &str, queued: usize) {
    let title = if queued == 0 {
        "Error".to_string()
    } else {
        format!("Error (+{queued} more)")
    };
    let action = if queued == 0 { " to dismiss" } else { " for the next one" };

    let hint = vec![
        Span::raw("Press "),
        key_span("Enter"),
        Span::raw(" or "),
        key_span("Esc"),
        Span::raw(action),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            title_color: Color::Red,
            border_color: Color::Red,
            message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
