//! Layout components (header tabs, status bar)

use crate::app::App;
use crate::platform::{SAVE_SHORTCUT, UPLOAD_SHORTCUT};
use crate::state::{RecordKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header tabs, in key order (`1`, `2`)
const TABS: &[(RecordKind, &str)] = &[
    (RecordKind::Product, "Products"),
    (RecordKind::Order, "Orders"),
];

/// Split the screen into header, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the header with section tabs and the current view title
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let section = app.state.current_view.section();

    let mut spans = vec![Span::styled(
        " Watheta ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for (idx, (kind, label)) in TABS.iter().enumerate() {
        let style = if *kind == section {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("{} {}", idx + 1, label), style));
    }

    if !matches!(app.state.current_view, View::Products | View::Orders) {
        spans.push(Span::styled("  › ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(app.state.current_view.title()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = get_view_hints(app.state.current_view);
    let spans = vec![Span::styled(format!(" {hints}"), Style::default().fg(Color::Gray))];

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Products => {
            concat!(
                "j/k:nav  Enter:view  n:new  e:edit  d:delete  y:copy  s/S:sort  c/f:filter  ",
                "[/]:min price  -/+:max price  x:clear  r:reload  Tab:orders"
            )
            .to_string()
        }
        View::Orders => {
            concat!(
                "j/k:nav  Enter:view  n:new  e:edit  d:delete  y:copy  s/S:sort  f:delivery  ",
                "r:reload  Tab:products"
            )
            .to_string()
        }
        View::ProductDetail | View::OrderDetail => {
            "e:edit  d:delete  y:copy  j/k:scroll  Esc:back".to_string()
        }
        View::ProductCreate => format!(
            concat!(
                "Tab:field  ←/→:option  PgDn/Enter:next  PgUp:back  ",
                "{}:next/publish  {}:upload  Esc:cancel"
            ),
            SAVE_SHORTCUT,
            UPLOAD_SHORTCUT
        ),
        View::OrderCreate => format!(
            "Tab:field  ←/→:option  PgDn/Enter:next  PgUp:back  {}:next/publish  Esc:cancel",
            SAVE_SHORTCUT
        ),
        View::ProductEdit => format!(
            "Tab:field  ←/→:option  {}:save  {}:upload  Esc:cancel",
            SAVE_SHORTCUT, UPLOAD_SHORTCUT
        ),
        View::OrderEdit => format!("Tab:field  ←/→:option  {}:save  Esc:cancel", SAVE_SHORTCUT),
    }
}
