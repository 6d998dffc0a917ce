//! Products list and detail views

use super::render_scrollable_list;
use super::widgets::{column, label_span, scroll_position};
use crate::app::App;
use crate::state::indicators::{satisfaction_score, DeliveryStage, SatisfactionTier, StockLevel};
use crate::state::records::{format_day, format_usd};
use crate::state::{Product, ProductStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn status_color(status: ProductStatus) -> Color {
    match status {
        ProductStatus::Active => Color::Green,
        ProductStatus::Inactive => Color::Red,
        ProductStatus::Draft => Color::Yellow,
        ProductStatus::Unknown => Color::DarkGray,
    }
}

pub fn stock_color(level: StockLevel) -> Color {
    match level {
        StockLevel::OutOfStock => Color::Red,
        StockLevel::Low => Color::Yellow,
        StockLevel::InStock => Color::Green,
    }
}

pub fn satisfaction_color(score: u8) -> Color {
    match SatisfactionTier::from_score(score) {
        SatisfactionTier::Excellent => Color::Green,
        SatisfactionTier::Good => Color::Cyan,
        SatisfactionTier::Fair => Color::Yellow,
        SatisfactionTier::Poor => Color::Red,
    }
}

pub fn stage_color(stage: DeliveryStage) -> Color {
    match stage {
        DeliveryStage::Pending => Color::DarkGray,
        DeliveryStage::Processing => Color::Yellow,
        DeliveryStage::Shipped => Color::Blue,
        DeliveryStage::Delivered => Color::Green,
    }
}

/// Draw the products list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_summary(frame, chunks[0], app);

    let products = app.state.sorted_products();
    let block = Block::default()
        .title(" Products ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if products.is_empty() {
        let message = if app.state.products.is_empty() {
            "No products yet.\nPress 'n' to create a new product."
        } else {
            "No products match the current filters.\nPress 'x' to clear filters."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, chunks[1]);
        return;
    }

    let mut items = vec![ListItem::new(Line::from(Span::styled(
        format!(
            "  {} {} {} {:>11} {:>5}  {} {} {:>4}  {} {}",
            column("Name", 22),
            column("SKU", 10),
            column("Category", 12),
            "Price",
            "Stock",
            column("Level", 12),
            column("Status", 8),
            "Sat",
            column("Progress", 10),
            "Created",
        ),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )))];

    items.extend(products.iter().enumerate().map(|(idx, product)| {
        product_row(product, idx == app.state.selected_index)
    }));

    let list = List::new(items).block(block);
    // Row 0 is the column header
    render_scrollable_list(frame, chunks[1], list, app.state.selected_index + 1);
}

fn product_row(product: &Product, is_selected: bool) -> ListItem<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let base = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let level = StockLevel::from_stock(product.stock);
    let score = satisfaction_score(&product.id);
    let stage = DeliveryStage::for_id(&product.id);

    ListItem::new(Line::from(vec![
        Span::styled(prefix, base),
        Span::styled(column(&product.product_name, 22), base.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(column(&product.product_sku, 10), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(column(&product.product_category, 12)),
        Span::raw(format!(" {:>11}", format_usd(product.price))),
        Span::raw(format!(" {:>5}  ", product.stock)),
        Span::styled(column(level.label(), 12), Style::default().fg(stock_color(level))),
        Span::raw(" "),
        Span::styled(
            column(product.status.label(), 8),
            Style::default().fg(status_color(product.status)),
        ),
        Span::styled(format!(" {:>3}%  ", score), Style::default().fg(satisfaction_color(score))),
        Span::styled(column(stage.label(), 10), Style::default().fg(stage_color(stage))),
        Span::styled(
            format!(" {}", format_day(&product.created_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

/// Stats line plus sort and filter state
fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.state.product_stats();
    let filters = &app.state.product_filters;

    let stats_line = Line::from(vec![
        Span::styled(" Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.total.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  Active ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.active.to_string(), Style::default().fg(Color::Green)),
        Span::styled("  Low stock ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.low_stock.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled("  Out of stock ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.out_of_stock.to_string(), Style::default().fg(Color::Red)),
        Span::styled(
            format!("  Showing {} of {}", stats.filtered, stats.total),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let price = format!(
        "{} - {}",
        format_usd(filters.min_price.unwrap_or(0.0)),
        format_usd(filters.max_price.unwrap_or_else(|| app.state.price_ceiling()))
    );
    let filter_line = Line::from(vec![
        Span::styled(
            format!(
                " Sort: {} {}",
                app.state.product_sort_field.label(),
                app.state.product_sort_direction.symbol()
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
        Span::raw(filters.category.clone().unwrap_or_else(|| "All".to_string())),
        Span::styled("  Status: ", Style::default().fg(Color::DarkGray)),
        Span::raw(filters.status.map_or("All", |s| s.label())),
        Span::styled("  Price: ", Style::default().fg(Color::DarkGray)),
        Span::raw(price),
        Span::styled(
            match filters.active_count() {
                0 => String::new(),
                n => format!("  ({n} active)"),
            },
            Style::default().fg(Color::Yellow),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![stats_line, filter_line]), area);
}

/// Draw the product detail view
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(product) = app.state.current_product() else {
        let message = Paragraph::new("Product not found")
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .title(" Product ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(message, area);
        return;
    };

    let content = detail_lines(product);
    let offset = scroll_position(app.state.scroll_offset, content.len());
    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(
            Block::default()
                .title(format!(" {} ", product.product_name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}

/// Body of the product detail view, one entry per unwrapped line
pub(super) fn detail_lines(product: &Product) -> Vec<Line<'_>> {
    let level = StockLevel::from_stock(product.stock);
    let score = satisfaction_score(&product.id);
    let stage = DeliveryStage::for_id(&product.id);

    let mut content = vec![
        Line::from(vec![
            label_span("Status"),
            Span::styled(product.status.label(), Style::default().fg(status_color(product.status))),
            Span::raw(" | "),
            label_span("Stock"),
            Span::raw(format!("{} ", product.stock)),
            Span::styled(level.label(), Style::default().fg(stock_color(level))),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("SKU"),
            Span::styled(&product.product_sku, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![label_span("Category"), Span::raw(&product.product_category)]),
        Line::from(vec![label_span("Price"), Span::raw(format_usd(product.price))]),
        Line::from(vec![
            label_span("Image"),
            Span::raw(product.image.as_deref().unwrap_or("(none)")),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("Satisfaction"),
            Span::styled(format!("{score}%"), Style::default().fg(satisfaction_color(score))),
            Span::raw(" | "),
            label_span("Delivery progress"),
            Span::styled(stage.label(), Style::default().fg(stage_color(stage))),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("ID"),
            Span::styled(&product.id, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![label_span("Created"), Span::raw(format_day(&product.created_at))]),
        Line::from(""),
        Line::from(Span::styled("Description", Style::default().add_modifier(Modifier::BOLD))),
    ];

    match product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => content.extend(description.lines().map(Line::from)),
        None => content.push(Line::from(Span::styled(
            "No description",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    content
}
