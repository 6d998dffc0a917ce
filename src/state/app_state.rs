//! Application state definitions

use super::flow::{CreateFlow, EditSession, RecordKind};
use super::notifications::Notifications;
use super::records::{DeliveryStatus, Order, Product, ProductStatus};
use std::cmp::Ordering;
use std::time::{Duration, Instant};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Products,
    ProductDetail,
    ProductCreate,
    ProductEdit,
    Orders,
    OrderDetail,
    OrderCreate,
    OrderEdit,
}

impl View {
    /// Views that hold an in-progress form; skipped when going back
    pub fn is_form_view(&self) -> bool {
        matches!(
            self,
            Self::ProductCreate | Self::ProductEdit | Self::OrderCreate | Self::OrderEdit
        )
    }

    /// Top-level tab the view belongs to
    pub fn section(&self) -> RecordKind {
        match self {
            Self::Products | Self::ProductDetail | Self::ProductCreate | Self::ProductEdit => {
                RecordKind::Product
            }
            _ => RecordKind::Order,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::ProductDetail => "Product Details",
            Self::ProductCreate => "Create New Product",
            Self::ProductEdit => "Edit Product",
            Self::Orders => "Orders",
            Self::OrderDetail => "Order Details",
            Self::OrderCreate => "Create New Order",
            Self::OrderEdit => "Edit Order",
        }
    }
}

/// View parameters for navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub product_id: Option<String>,
    pub order_id: Option<String>,
}

/// Sort field for products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    CreatedAt,
    Name,
    Category,
    Price,
    Stock,
    Status,
}

impl ProductSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::CreatedAt => Self::Name,
            Self::Name => Self::Category,
            Self::Category => Self::Price,
            Self::Price => Self::Stock,
            Self::Stock => Self::Status,
            Self::Status => Self::CreatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Price => "Price",
            Self::Stock => "Stock",
            Self::Status => "Status",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created",
            Self::Name => "name",
            Self::Category => "category",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Status => "status",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::CreatedAt,
            Self::Name,
            Self::Category,
            Self::Price,
            Self::Stock,
            Self::Status,
        ]
        .into_iter()
        .find(|f| f.as_str() == value)
    }
}

/// Sort field for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortField {
    #[default]
    CreatedAt,
    OrderId,
    Client,
    Quantity,
    DeliveryDate,
}

impl OrderSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::CreatedAt => Self::OrderId,
            Self::OrderId => Self::Client,
            Self::Client => Self::Quantity,
            Self::Quantity => Self::DeliveryDate,
            Self::DeliveryDate => Self::CreatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::OrderId => "Order ID",
            Self::Client => "Client",
            Self::Quantity => "Quantity",
            Self::DeliveryDate => "Delivery",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created",
            Self::OrderId => "order_id",
            Self::Client => "client",
            Self::Quantity => "quantity",
            Self::DeliveryDate => "delivery_date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::CreatedAt,
            Self::OrderId,
            Self::Client,
            Self::Quantity,
            Self::DeliveryDate,
        ]
        .into_iter()
        .find(|f| f.as_str() == value)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Filters applied to the products list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    /// Lower price bound; `None` means from zero
    pub min_price: Option<f64>,
    /// Upper price bound; `None` means the full range
    pub max_price: Option<f64>,
}

impl ProductFilters {
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.status.is_some(),
            self.min_price.is_some() || self.max_price.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    fn matches(&self, product: &Product) -> bool {
        self.category
            .as_ref()
            .map_or(true, |c| &product.product_category == c)
            && self.status.map_or(true, |s| product.status == s)
            && product.price >= self.min_price.unwrap_or(0.0)
            && self.max_price.map_or(true, |max| product.price <= max)
    }
}

/// Summary counters shown above the products list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub total: usize,
    pub filtered: usize,
    pub active: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Summary counters shown above the orders list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: RecordKind,
    pub id: String,
    /// Name shown in the confirmation prompt
    pub label: String,
}

/// Step of the price filter adjustment
pub const PRICE_FILTER_STEP: f64 = 50.0;

/// Lowest upper bound of the price filter range
const PRICE_FILTER_FLOOR: f64 = 1000.0;

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Data
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub products_fetched_at: Option<Instant>,
    pub orders_fetched_at: Option<Instant>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Sorting
    pub product_sort_field: ProductSortField,
    pub product_sort_direction: SortDirection,
    pub order_sort_field: OrderSortField,
    pub order_sort_direction: SortDirection,

    // Filters
    pub product_filters: ProductFilters,
    pub order_delivery_filter: Option<DeliveryStatus>,

    // Forms
    pub create_flow: Option<CreateFlow>,
    pub edit_session: Option<EditSession>,

    // Dialogs and messages
    pub pending_delete: Option<PendingDelete>,
    pub notifications: Notifications,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Scroll a detail body of `line_count` lines, stopping at its last line
    pub fn scroll_down(&mut self, line_count: usize) {
        if self.scroll_offset + 1 < line_count {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn cycle_product_sort_field(&mut self) {
        self.product_sort_field = self.product_sort_field.next();
        self.reset_selection();
    }

    pub fn toggle_product_sort_direction(&mut self) {
        self.product_sort_direction = self.product_sort_direction.toggle();
        self.reset_selection();
    }

    pub fn cycle_order_sort_field(&mut self) {
        self.order_sort_field = self.order_sort_field.next();
        self.reset_selection();
    }

    pub fn toggle_order_sort_direction(&mut self) {
        self.order_sort_direction = self.order_sort_direction.toggle();
        self.reset_selection();
    }

    /// Sorted unique product categories
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .products
            .iter()
            .map(|p| p.product_category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Sorted unique product statuses
    pub fn statuses(&self) -> Vec<ProductStatus> {
        let mut statuses: Vec<ProductStatus> = self.products.iter().map(|p| p.status).collect();
        statuses.sort_by_key(|s| s.as_str());
        statuses.dedup();
        statuses
    }

    /// Top of the price filter range
    pub fn price_ceiling(&self) -> f64 {
        self.products
            .iter()
            .map(|p| p.price)
            .fold(PRICE_FILTER_FLOOR, f64::max)
    }

    /// Advance the category filter: all, then each category in order, then all again
    pub fn cycle_category_filter(&mut self) {
        let categories = self.categories();
        self.product_filters.category =
            cycle_option(&categories, self.product_filters.category.as_ref());
        self.reset_selection();
    }

    /// Advance the status filter the same way as the category filter
    pub fn cycle_status_filter(&mut self) {
        let statuses = self.statuses();
        self.product_filters.status = cycle_option(&statuses, self.product_filters.status.as_ref());
        self.reset_selection();
    }

    /// Move the lower price bound by `delta`, never above the upper bound
    pub fn adjust_min_price(&mut self, delta: f64) {
        let upper = self
            .product_filters
            .max_price
            .unwrap_or_else(|| self.price_ceiling());
        let current = self.product_filters.min_price.unwrap_or(0.0);
        let next = (current + delta).clamp(0.0, upper);
        self.product_filters.min_price = (next > 0.0).then_some(next);
        self.reset_selection();
    }

    /// Move the upper price bound by `delta`, within `[min_price, price_ceiling]`
    pub fn adjust_max_price(&mut self, delta: f64) {
        let ceiling = self.price_ceiling();
        let lower = self.product_filters.min_price.unwrap_or(0.0);
        let current = self.product_filters.max_price.unwrap_or(ceiling);
        let next = (current + delta).clamp(lower, ceiling);
        self.product_filters.max_price = (next < ceiling).then_some(next);
        self.reset_selection();
    }

    pub fn clear_product_filters(&mut self) {
        self.product_filters = ProductFilters::default();
        self.reset_selection();
    }

    pub fn cycle_delivery_filter(&mut self) {
        self.order_delivery_filter =
            cycle_option(&DeliveryStatus::KNOWN, self.order_delivery_filter.as_ref());
        self.reset_selection();
    }

    /// Products after filtering, in the chosen order
    pub fn sorted_products(&self) -> Vec<&Product> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .filter(|p| self.product_filters.matches(p))
            .collect();

        products.sort_by(|a, b| {
            let cmp = match self.product_sort_field {
                ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                ProductSortField::Name => a
                    .product_name
                    .to_lowercase()
                    .cmp(&b.product_name.to_lowercase()),
                ProductSortField::Category => a.product_category.cmp(&b.product_category),
                ProductSortField::Price => a.price.total_cmp(&b.price),
                ProductSortField::Stock => a.stock.cmp(&b.stock),
                ProductSortField::Status => a.status.as_str().cmp(b.status.as_str()),
            };
            self.product_sort_direction.apply(cmp)
        });

        products
    }

    /// Orders after filtering, in the chosen order
    pub fn sorted_orders(&self) -> Vec<&Order> {
        let mut orders: Vec<_> = self
            .orders
            .iter()
            .filter(|o| self.order_delivery_filter.map_or(true, |s| o.delivery_status == s))
            .collect();

        orders.sort_by(|a, b| {
            let cmp = match self.order_sort_field {
                OrderSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                OrderSortField::OrderId => a.order_id.cmp(&b.order_id),
                OrderSortField::Client => a
                    .client_name
                    .to_lowercase()
                    .cmp(&b.client_name.to_lowercase()),
                OrderSortField::Quantity => a.quantity.cmp(&b.quantity),
                OrderSortField::DeliveryDate => {
                    a.expected_delivery_date.cmp(&b.expected_delivery_date)
                }
            };
            self.order_sort_direction.apply(cmp)
        });

        orders
    }

    pub fn product_stats(&self) -> ProductStats {
        ProductStats {
            total: self.products.len(),
            filtered: self.sorted_products().len(),
            active: self
                .products
                .iter()
                .filter(|p| p.status == ProductStatus::Active)
                .count(),
            low_stock: self
                .products
                .iter()
                .filter(|p| p.stock > 0 && p.stock < 10)
                .count(),
            out_of_stock: self.products.iter().filter(|p| p.stock == 0).count(),
        }
    }

    pub fn order_stats(&self) -> OrderStats {
        let count = |status: DeliveryStatus| {
            self.orders
                .iter()
                .filter(|o| o.delivery_status == status)
                .count()
        };
        OrderStats {
            total: self.orders.len(),
            pending: count(DeliveryStatus::Pending),
            delivered: count(DeliveryStatus::Delivered),
            cancelled: count(DeliveryStatus::Cancelled),
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.sorted_products().get(self.selected_index).copied()
    }

    pub fn selected_order(&self) -> Option<&Order> {
        self.sorted_orders().get(self.selected_index).copied()
    }

    /// Product shown by the detail or edit view
    pub fn current_product(&self) -> Option<&Product> {
        let id = self.view_params.product_id.as_ref()?;
        self.products.iter().find(|p| &p.id == id)
    }

    /// Order shown by the detail or edit view
    pub fn current_order(&self) -> Option<&Order> {
        let id = self.view_params.order_id.as_ref()?;
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Replace the product list, remembering when it was fetched
    pub fn set_products(&mut self, products: Vec<Product>, now: Instant) {
        self.products = products;
        self.products_fetched_at = Some(now);
        let len = self.sorted_products().len();
        self.clamp_selection(len);
    }

    /// Replace the order list, remembering when it was fetched
    pub fn set_orders(&mut self, orders: Vec<Order>, now: Instant) {
        self.orders = orders;
        self.orders_fetched_at = Some(now);
        let len = self.sorted_orders().len();
        self.clamp_selection(len);
    }

    /// Replace a product by id with a freshly fetched copy, or append it
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }

    pub fn upsert_order(&mut self, order: Order) {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order,
            None => self.orders.push(order),
        }
    }

    /// True when the list behind `kind` was never fetched or is older than `max_age`
    pub fn is_stale(&self, kind: RecordKind, now: Instant, max_age: Duration) -> bool {
        let fetched_at = match kind {
            RecordKind::Product => self.products_fetched_at,
            RecordKind::Order => self.orders_fetched_at,
        };
        fetched_at.map_or(true, |at| now.duration_since(at) >= max_age)
    }
}

/// Next value in `none → options[0] → … → options[n-1] → none`
fn cycle_option<T: Clone + PartialEq>(options: &[T], current: Option<&T>) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}
