//! Orders list and detail views

use super::products::stage_color;
use super::render_scrollable_list;
use super::widgets::{column, label_span, scroll_position};
use crate::app::App;
use crate::state::indicators::{DeliveryStage, Feedback};
use crate::state::records::{format_day, format_usd};
use crate::state::{DeliveryStatus, Order, PaymentStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn payment_color(status: PaymentStatus) -> Color {
    match status {
        PaymentStatus::Paid => Color::Green,
        PaymentStatus::Pending => Color::Yellow,
        PaymentStatus::Refunded => Color::Magenta,
        PaymentStatus::Unknown => Color::DarkGray,
    }
}

fn delivery_color(status: DeliveryStatus) -> Color {
    match status {
        DeliveryStatus::Pending => Color::Yellow,
        DeliveryStatus::Shipped => Color::Blue,
        DeliveryStatus::Delivered => Color::Green,
        DeliveryStatus::Cancelled => Color::Red,
        DeliveryStatus::Unknown => Color::DarkGray,
    }
}

fn feedback_color(feedback: Feedback) -> Color {
    match feedback {
        Feedback::Satisfied => Color::Green,
        Feedback::Neutral => Color::Yellow,
        Feedback::Unsatisfied => Color::Red,
    }
}

fn delivery_date(order: &Order) -> String {
    order
        .expected_delivery_date
        .map(|d| d.format("%d %b, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Draw the orders list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_summary(frame, chunks[0], app);

    let orders = app.state.sorted_orders();
    let block = Block::default()
        .title(" Orders ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if orders.is_empty() {
        let message = if app.state.orders.is_empty() {
            "No orders yet.\nPress 'n' to create a new order."
        } else {
            "No orders with this delivery status.\nPress 'f' to change the filter."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, chunks[1]);
        return;
    }

    let mut items = vec![ListItem::new(Line::from(Span::styled(
        format!(
            "  {} {} {:>5} {:>11}  {} {} {} {} {}  {}",
            column("Order ID", 18),
            column("Client", 16),
            "Qty",
            "Total",
            column("Delivery by", 12),
            column("Payment", 9),
            column("Status", 10),
            column("Progress", 10),
            "Fb",
            "Created",
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )))];

    items.extend(
        orders
            .iter()
            .enumerate()
            .map(|(idx, order)| order_row(order, idx == app.state.selected_index)),
    );

    let list = List::new(items).block(block);
    render_scrollable_list(frame, chunks[1], list, app.state.selected_index + 1);
}

fn order_row(order: &Order, is_selected: bool) -> ListItem<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let base = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let stage = DeliveryStage::for_id(&order.order_id);
    let feedback = Feedback::random();

    ListItem::new(Line::from(vec![
        Span::styled(prefix, base),
        Span::styled(column(&order.order_id, 18), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(column(&order.client_name, 16), base.add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {:>5}", order.quantity)),
        Span::raw(format!(" {:>11}  ", format_usd(order.total_amount()))),
        Span::raw(column(&delivery_date(order), 12)),
        Span::raw(" "),
        Span::styled(
            column(order.payment_status.as_str(), 9),
            Style::default().fg(payment_color(order.payment_status)),
        ),
        Span::raw(" "),
        Span::styled(
            column(order.delivery_status.as_str(), 10),
            Style::default().fg(delivery_color(order.delivery_status)),
        ),
        Span::raw(" "),
        Span::styled(column(stage.label(), 10), Style::default().fg(stage_color(stage))),
        Span::raw(" "),
        Span::styled(feedback.symbol(), Style::default().fg(feedback_color(feedback))),
        Span::styled(
            format!("  {}", format_day(&order.created_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.state.order_stats();

    let stats_line = Line::from(vec![
        Span::styled(" Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.total.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  Pending ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.pending.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled("  Delivered ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.delivered.to_string(), Style::default().fg(Color::Green)),
        Span::styled("  Cancelled ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.cancelled.to_string(), Style::default().fg(Color::Red)),
    ]);

    let filter_line = Line::from(vec![
        Span::styled(
            format!(
                " Sort: {} {}",
                app.state.order_sort_field.label(),
                app.state.order_sort_direction.symbol()
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Delivery: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.state.order_delivery_filter.map_or("All", |s| s.as_str())),
    ]);

    frame.render_widget(Paragraph::new(vec![stats_line, filter_line]), area);
}

/// Draw the order detail view
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(order) = app.state.current_order() else {
        let message = Paragraph::new("Order not found")
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .title(" Order ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(message, area);
        return;
    };

    let content = detail_lines(app, order);
    let offset = scroll_position(app.state.scroll_offset, content.len());
    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(
            Block::default()
                .title(format!(" {} ", order.order_id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

/// Body of the order detail view, one entry per unwrapped line
pub(super) fn detail_lines<'a>(app: &'a App, order: &'a Order) -> Vec<Line<'a>> {
    let stage = DeliveryStage::for_id(&order.order_id);
    let feedback = Feedback::random();

    let mut content = vec![
        Line::from(vec![
            label_span("Payment"),
            Span::styled(
                order.payment_status.as_str(),
                Style::default().fg(payment_color(order.payment_status)),
            ),
            Span::raw(" | "),
            label_span("Delivery"),
            Span::styled(
                order.delivery_status.as_str(),
                Style::default().fg(delivery_color(order.delivery_status)),
            ),
        ]),
        Line::from(""),
        Line::from(vec![label_span("Client"), Span::raw(&order.client_name)]),
        Line::from(vec![label_span("Delivery address"), Span::raw(&order.delivery_address)]),
        Line::from(vec![label_span("Expected delivery"), Span::raw(delivery_date(order))]),
        Line::from(""),
        Line::from(vec![label_span("Quantity"), Span::raw(order.quantity.to_string())]),
        Line::from(vec![
            label_span("Total"),
            Span::styled(
                format_usd(order.total_amount()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("Delivery progress"),
            Span::styled(stage.label(), Style::default().fg(stage_color(stage))),
            Span::raw(" | "),
            label_span("Customer feedback"),
            Span::styled(feedback.symbol(), Style::default().fg(feedback_color(feedback))),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("ID"),
            Span::styled(&order.id, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![label_span("Created"), Span::raw(format_day(&order.created_at))]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Products ({})", order.products.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for product_id in &order.products {
        let name = app
            .state
            .products
            .iter()
            .find(|p| &p.id == product_id)
            .map(|p| p.product_name.as_str())
            .unwrap_or("");
        content.push(Line::from(vec![
            Span::raw("  • "),
            Span::styled(product_id.as_str(), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(name),
        ]));
    }

    content
}
