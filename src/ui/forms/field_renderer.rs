//! Field rendering utilities for forms

use crate::platform::UPLOAD_SHORTCUT;
use crate::state::forms::{product_fields, FormField, FormValues};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const MULTILINE_HEIGHT: u16 = 6;
const FIELD_HEIGHT: u16 = 3;

/// Upload path segment that precedes the stored file name
const UPLOAD_MARKER: &str = "/watheta-dashboard/";

/// Rows a field takes, including its error line
pub fn field_height(field: &FormField, has_error: bool) -> u16 {
    let base = if field.is_multiline {
        MULTILINE_HEIGHT
    } else {
        FIELD_HEIGHT
    };
    base + u16::from(has_error)
}

/// Draw a form field and, below it, its validation error
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let border_style = match (is_active, error.is_some()) {
        (_, true) => Style::default().fg(Color::Red),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if display_str.ends_with('\n') || lines.is_empty() {
            lines.push(Line::from(""));
        }
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let input_height = area.height.saturating_sub(u16::from(error.is_some()));
    let input_area = Rect {
        height: input_height,
        ..area
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), input_area);

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y + input_height,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {message}"), Style::default().fg(Color::Red))),
            error_area,
        );
    }
}

/// Draw the named fields top to bottom, scrolled so the active one is visible
pub fn draw_fields(
    frame: &mut Frame,
    area: Rect,
    form: &FormValues,
    names: &[&'static str],
    active: usize,
) {
    let fields: Vec<(&FormField, Option<&str>)> = names
        .iter()
        .filter_map(|name| form.field(name).map(|f| (f, form.error(name))))
        .collect();
    let heights: Vec<u16> = fields
        .iter()
        .map(|(f, err)| field_height(f, err.is_some()))
        .collect();

    // First field to draw: move down until the active field fits
    let last = active.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < last && heights[start..=last].iter().sum::<u16>() > area.height {
        start += 1;
    }

    let mut y = area.y;
    for (idx, (field, error)) in fields.iter().enumerate().skip(start) {
        let height = heights[idx];
        if y + height > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_field(frame, field_area, field, idx == active, *error);
        y += height;
    }
}

/// Upload status or stored file name shown under the image field
pub fn image_status_line(form: &FormValues, uploading: bool) -> Line<'static> {
    if uploading {
        return Line::from(Span::styled(
            " Uploading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let value = form.text(product_fields::IMAGE).trim();
    if value.is_empty() {
        Line::from(Span::styled(
            format!(" No image. Type a local file path and press {UPLOAD_SHORTCUT} to upload."),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled(" Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(short_image_name(value), Style::default().fg(Color::Green)),
        ])
    }
}

/// Short display name for an uploaded image URL
///
/// Takes the last path segment after the upload folder; names longer than
/// 28 characters keep their first 20 characters and the extension.
pub fn short_image_name(value: &str) -> String {
    let Ok(url) = url::Url::parse(value) else {
        return value.to_string();
    };
    let path = url.path();
    let tail = match path.find(UPLOAD_MARKER) {
        Some(idx) => &path[idx + UPLOAD_MARKER.len()..],
        None => path,
    };
    let last = tail.split('/').filter(|s| !s.is_empty()).last().unwrap_or(tail);

    if last.chars().count() <= 28 {
        return last.to_string();
    }
    let (name, ext) = match last.rfind('.') {
        Some(dot) => last.split_at(dot),
        None => (last, ""),
    };
    let head: String = name.chars().take(20).collect();
    format!("{head}...{ext}")
}
