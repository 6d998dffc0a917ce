//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod orders;
mod products;
mod widgets;

pub use widgets::render_scrollable_list;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog, render_notifications};
use ratatui::Frame;

/// Number of body lines in the open detail view
pub fn detail_line_count(app: &App) -> usize {
    match app.state.current_view {
        View::ProductDetail => app
            .state
            .current_product()
            .map_or(0, |product| products::detail_lines(product).len()),
        View::OrderDetail => app
            .state
            .current_order()
            .map_or(0, |order| orders::detail_lines(app, order).len()),
        _ => 0,
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Products => products::draw_list(frame, main_area, app),
        View::ProductDetail => products::draw_detail(frame, main_area, app),
        View::Orders => orders::draw_list(frame, main_area, app),
        View::OrderDetail => orders::draw_detail(frame, main_area, app),
        View::ProductCreate | View::OrderCreate => forms::draw_create(frame, main_area, app),
        View::ProductEdit | View::OrderEdit => forms::draw_edit(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    render_notifications(frame, main_area, &app.state.notifications);

    // Modal overlays last so they sit on top
    if let Some(pending) = &app.state.pending_delete {
        render_confirm_dialog(frame, pending);
    }
    if let Some(message) = app.state.notifications.current_error() {
        render_error_dialog(frame, message, app.state.notifications.queued_errors());
    }
}
