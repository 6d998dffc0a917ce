//! Confirmation dialog for deletes

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::{PendingDelete, RecordKind};
use ratatui::{style::Color, text::Span, Frame};

/// Render the delete confirmation for `pending`
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let message = format!(
        "Are you sure you want to delete {} \"{}\"? This action cannot be undone.",
        pending.kind.noun(),
        pending.label
    );
    let title = match pending.kind {
        RecordKind::Product => "Delete Product",
        RecordKind::Order => "Delete Order",
    };

    let hint = vec![
        key_span("y"),
        Span::raw("/"),
        key_span("Enter"),
        Span::raw(" delete  "),
        key_span("n"),
        Span::raw("/"),
        key_span("Esc"),
        Span::raw(" cancel"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: Color::Red,
            border_color: Color::Red,
            message: &message,
            hint: Some(hint),
            max_width: 56,
        },
    );
}
