//! Application state and core logic

use crate::backend::{ApiError, BackendClient, BackendClientTrait};
use crate::config::TuiConfig;
use crate::platform::COMMAND_MODIFIER;
use crate::state::flow::{
    check_unique_name, name_taken_message, AdvanceRequest, EditPayload, SubmitBlocked, Submission,
    UniqueNameVerdict, NAME_UNVERIFIED, VALIDATION_FAILED,
};
use crate::state::forms::{product_fields, Form, FormValues};
use crate::state::wizard::{Advance, AdvanceTicket};
use crate::state::{
    AppState, CreateFlow, EditSession, OrderSortField, PendingDelete, ProductSortField, RecordKind,
    SortDirection, View, ViewParams, PRICE_FILTER_STEP,
};
use crate::ui;
use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const UPLOAD_IN_PROGRESS: &str = "Please wait for the image upload to finish";

/// Result of a background task, tagged with the flow that started it
#[derive(Debug)]
pub enum TaskResult {
    NameCheck {
        flow_id: Uuid,
        ticket: AdvanceTicket,
        name: String,
        verdict: UniqueNameVerdict,
    },
    Upload {
        owner: Uuid,
        result: Result<String, ApiError>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    backend: Arc<dyn BackendClientTrait>,
    config: TuiConfig,
    /// Write sort preferences back to the config file
    persist_config: bool,
    /// Whether the app should quit
    quit: bool,
    task_tx: mpsc::UnboundedSender<TaskResult>,
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
}

/// Calendar date used for the "not in the past" rule
fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    /// Create the app against the configured backend and load both lists
    pub async fn new() -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|err| {
            warn!("Failed to load config, using defaults: {err}");
            TuiConfig::default()
        });
        let client = BackendClient::new(config.backend_base_url(), config.upload_url())?;
        info!(backend = config.backend_base_url(), "Starting dashboard");

        let mut app = Self::with_backend(Arc::new(client), config);
        app.persist_config = true;
        app.refresh(RecordKind::Product).await;
        app.refresh(RecordKind::Order).await;
        Ok(app)
    }

    /// Create the app around an existing backend without fetching anything
    pub fn with_backend(backend: Arc<dyn BackendClientTrait>, config: TuiConfig) -> Self {
        let mut state = AppState::default();
        if let Some(field) = config
            .product_sort_field
            .as_deref()
            .and_then(ProductSortField::parse)
        {
            state.product_sort_field = field;
        }
        if let Some(dir) = config.product_sort_direction.as_deref().and_then(SortDirection::parse) {
            state.product_sort_direction = dir;
        }
        if let Some(field) = config.order_sort_field.as_deref().and_then(OrderSortField::parse) {
            state.order_sort_field = field;
        }
        if let Some(dir) = config.order_sort_direction.as_deref().and_then(SortDirection::parse) {
            state.order_sort_direction = dir;
        }

        let (task_tx, task_rx) = mpsc::unbounded_channel();
        Self {
            state,
            backend,
            config,
            persist_config: false,
            quit: false,
            task_tx,
            task_rx,
        }
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply finished background work and expire old notifications
    pub fn tick(&mut self, now: Instant) {
        while let Ok(result) = self.task_rx.try_recv() {
            self.apply_task_result(result);
        }
        self.state.notifications.expire(now);
    }

    /// Route a background result to its flow; results for closed flows are dropped
    pub fn apply_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::NameCheck {
                flow_id,
                ticket,
                name,
                verdict,
            } => {
                let Some(flow) = self
                    .state
                    .create_flow
                    .as_mut()
                    .filter(|f| f.id() == flow_id)
                else {
                    debug!(%flow_id, "Dropping name check for a closed flow");
                    return;
                };
                match flow.apply_name_verdict(ticket, &verdict) {
                    Advance::Moved(step) => debug!(step, "Name available, advanced"),
                    Advance::Blocked => {
                        self.state.notifications.error(name_taken_message(&name), None);
                    }
                    Advance::Unverified(reason) => {
                        debug!(%reason, "Name check failed");
                        self.state.notifications.error(NAME_UNVERIFIED, None);
                    }
                    outcome => debug!(?outcome, "Dropping stale name check"),
                }
            }
            TaskResult::Upload { owner, result } => {
                let form: &mut FormValues = if let Some(flow) =
                    self.state.create_flow.as_mut().filter(|f| f.id() == owner)
                {
                    flow.uploading = false;
                    flow.form_mut()
                } else if let Some(session) =
                    self.state.edit_session.as_mut().filter(|s| s.id() == owner)
                {
                    session.uploading = false;
                    &mut session.form
                } else {
                    debug!(%owner, "Dropping upload result for a closed form");
                    return;
                };

                match result {
                    Ok(url) => {
                        info!(%url, "Image uploaded");
                        form.set_value(product_fields::IMAGE, url);
                        self.state
                            .notifications
                            .success("Image uploaded", "The image URL has been filled in.");
                    }
                    Err(err) => {
                        warn!(error = %err, "Image upload failed");
                        self.state
                            .notifications
                            .error("Upload failed", Some(err.user_message()));
                    }
                }
            }
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.notifications.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.notifications.dismiss_error();
            }
            return Ok(());
        }

        if self.state.pending_delete.is_some() {
            self.handle_delete_dialog_key(key).await;
            return Ok(());
        }

        match self.state.current_view {
            View::Products => self.handle_products_key(key).await?,
            View::Orders => self.handle_orders_key(key).await?,
            View::ProductDetail | View::OrderDetail => self.handle_detail_key(key).await?,
            View::ProductCreate | View::OrderCreate => self.handle_create_key(key).await?,
            View::ProductEdit | View::OrderEdit => self.handle_edit_key(key).await?,
        }
        Ok(())
    }

    /// Handle mouse input: the wheel moves the list selection
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let len = match self.state.current_view {
            View::Products => self.state.sorted_products().len(),
            View::Orders => self.state.sorted_orders().len(),
            View::ProductDetail | View::OrderDetail => {
                match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        let line_count = ui::detail_line_count(self);
                        self.state.scroll_down(line_count);
                    }
                    MouseEventKind::ScrollUp => self.state.scroll_up(),
                    _ => {}
                }
                return;
            }
            _ => return,
        };
        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.move_selection_down(len),
            MouseEventKind::ScrollUp => self.state.move_selection_up(),
            _ => {}
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        self.state
            .view_history
            .push((self.state.current_view, self.state.view_params.clone()));
        self.state.current_view = view;
        self.state.view_params = params;
        self.state.scroll_offset = 0;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.scroll_offset = 0;
        // Skip form views in history to go back to the last non-form view
        while let Some((view, params)) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.view_params = params;
            return;
        }
        self.show_list(self.state.current_view.section());
    }

    /// Switch to a top-level list, dropping history
    fn show_list(&mut self, kind: RecordKind) {
        let view = match kind {
            RecordKind::Product => View::Products,
            RecordKind::Order => View::Orders,
        };
        self.state.view_history.clear();
        self.state.view_params = ViewParams::default();
        if self.state.current_view != view {
            self.state.current_view = view;
            self.state.reset_selection();
        }
    }

    /// Switch to a list, refetching it when the cached copy is stale
    async fn open_list(&mut self, kind: RecordKind) {
        self.show_list(kind);
        if self
            .state
            .is_stale(kind, Instant::now(), self.config.stale_after())
        {
            self.refresh(kind).await;
        }
    }

    /// Refetch one list; failures go to the error dialog
    pub async fn refresh(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Product => match self.backend.list_products().await {
                Ok(products) => {
                    debug!(count = products.len(), "Loaded products");
                    self.state.set_products(products, Instant::now());
                }
                Err(err) => {
                    warn!(error = %err, "Failed to load products");
                    self.state
                        .notifications
                        .push_error_dialog(format!(
                            "Failed to load products: {}",
                            err.user_message()
                        ));
                }
            },
            RecordKind::Order => match self.backend.list_orders().await {
                Ok(orders) => {
                    debug!(count = orders.len(), "Loaded orders");
                    self.state.set_orders(orders, Instant::now());
                }
                Err(err) => {
                    warn!(error = %err, "Failed to load orders");
                    self.state
                        .notifications
                        .push_error_dialog(format!(
                            "Failed to load orders: {}",
                            err.user_message()
                        ));
                }
            },
        }
    }

    /// Handle keys in Products view
    async fn handle_products_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.state.sorted_products().len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(len),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('n') => self.start_create(RecordKind::Product),
            KeyCode::Enter => {
                if let Some(id) = self.state.selected_product().map(|p| p.id.clone()) {
                    self.open_detail(RecordKind::Product, id).await;
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.state.selected_product().map(|p| p.id.clone()) {
                    self.start_edit(RecordKind::Product, id).await;
                }
            }
            KeyCode::Char('d') => self.ask_delete(RecordKind::Product),
            KeyCode::Char('y') => self.copy_focused_id(RecordKind::Product),
            KeyCode::Char('s') => {
                self.state.cycle_product_sort_field();
                self.save_sort_preferences();
            }
            KeyCode::Char('S') => {
                self.state.toggle_product_sort_direction();
                self.save_sort_preferences();
            }
            KeyCode::Char('c') => self.state.cycle_category_filter(),
            KeyCode::Char('f') => self.state.cycle_status_filter(),
            KeyCode::Char('-') => self.state.adjust_max_price(-PRICE_FILTER_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.state.adjust_max_price(PRICE_FILTER_STEP)
            }
            KeyCode::Char('[') => self.state.adjust_min_price(-PRICE_FILTER_STEP),
            KeyCode::Char(']') => self.state.adjust_min_price(PRICE_FILTER_STEP),
            KeyCode::Char('x') => self.state.clear_product_filters(),
            KeyCode::Char('r') => self.refresh(RecordKind::Product).await,
            KeyCode::Tab | KeyCode::Char('2') => self.open_list(RecordKind::Order).await,
            KeyCode::Char('1') => self.open_list(RecordKind::Product).await,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Orders view
    async fn handle_orders_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.state.sorted_orders().len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(len),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('n') => self.start_create(RecordKind::Order),
            KeyCode::Enter => {
                if let Some(id) = self.state.selected_order().map(|o| o.id.clone()) {
                    self.open_detail(RecordKind::Order, id).await;
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.state.selected_order().map(|o| o.id.clone()) {
                    self.start_edit(RecordKind::Order, id).await;
                }
            }
            KeyCode::Char('d') => self.ask_delete(RecordKind::Order),
            KeyCode::Char('y') => self.copy_focused_id(RecordKind::Order),
            KeyCode::Char('s') => {
                self.state.cycle_order_sort_field();
                self.save_sort_preferences();
            }
            KeyCode::Char('S') => {
                self.state.toggle_order_sort_direction();
                self.save_sort_preferences();
            }
            KeyCode::Char('f') => self.state.cycle_delivery_filter(),
            KeyCode::Char('r') => self.refresh(RecordKind::Order).await,
            KeyCode::BackTab | KeyCode::Tab | KeyCode::Char('1') => {
                self.open_list(RecordKind::Product).await
            }
            KeyCode::Char('2') => self.open_list(RecordKind::Order).await,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the product and order detail views
    async fn handle_detail_key(&mut self, key: KeyEvent) -> Result<()> {
        let kind = self.state.current_view.section();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.go_back(),
            KeyCode::Char('j') | KeyCode::Down => {
                let line_count = ui::detail_line_count(self);
                self.state.scroll_down(line_count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('e') => {
                if let Some(id) = self.focused_record_id(kind) {
                    self.start_edit(kind, id).await;
                }
            }
            KeyCode::Char('d') => self.ask_delete(kind),
            KeyCode::Char('y') => self.copy_focused_id(kind),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the create wizards
    async fn handle_create_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(flow) = self.state.create_flow.as_mut() else {
            self.go_back();
            return Ok(());
        };
        let command = key.modifiers.contains(COMMAND_MODIFIER)
            || key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                debug!(flow = %flow.id(), "Create flow cancelled");
                self.state.create_flow = None;
                self.go_back();
            }
            KeyCode::Char('s') if command => self.press_next().await,
            KeyCode::Char('u') if command => self.start_upload(),
            KeyCode::Char('b') if command => flow.retreat(None),
            KeyCode::PageDown => self.press_next().await,
            KeyCode::PageUp => flow.retreat(None),
            KeyCode::Tab | KeyCode::Down => flow.next_field(),
            KeyCode::BackTab | KeyCode::Up => flow.prev_field(),
            KeyCode::Left => {
                if let Some(field) = flow.focused_field_mut() {
                    field.prev_option();
                }
            }
            KeyCode::Right => {
                if let Some(field) = flow.focused_field_mut() {
                    field.next_option();
                }
            }
            KeyCode::Enter => {
                let multiline = flow.focused_field_mut().is_some_and(|f| f.is_multiline);
                if multiline {
                    if let Some(field) = flow.focused_field_mut() {
                        field.push_char('\n');
                    }
                } else {
                    self.press_next().await;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = flow.focused_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = flow.focused_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the edit views
    async fn handle_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(session) = self.state.edit_session.as_mut() else {
            self.go_back();
            return Ok(());
        };
        let command = key.modifiers.contains(COMMAND_MODIFIER)
            || key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.state.edit_session = None;
                self.go_back();
            }
            KeyCode::Char('s') if command => self.save_edit().await,
            KeyCode::Char('u') if command => self.start_upload(),
            KeyCode::Tab | KeyCode::Down => session.next_field(),
            KeyCode::BackTab | KeyCode::Up => session.prev_field(),
            KeyCode::Left => {
                if let Some(field) = session.focused_field_mut() {
                    field.prev_option();
                }
            }
            KeyCode::Right => {
                if let Some(field) = session.focused_field_mut() {
                    field.next_option();
                }
            }
            KeyCode::Enter => match session.focused_field_mut() {
                Some(field) if field.is_multiline => field.push_char('\n'),
                _ => session.next_field(),
            },
            KeyCode::Backspace => {
                if let Some(field) = session.focused_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = session.focused_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the delete confirmation dialog
    async fn handle_delete_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(pending) = self.state.pending_delete.clone() {
                    self.confirm_delete(pending).await;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.state.pending_delete = None,
            _ => {}
        }
    }

    /// Open the create wizard for `kind`
    pub fn start_create(&mut self, kind: RecordKind) {
        let (flow, view) = match kind {
            RecordKind::Product => (CreateFlow::new_product(), View::ProductCreate),
            RecordKind::Order => (CreateFlow::new_order(), View::OrderCreate),
        };
        debug!(flow = %flow.id(), kind = kind.noun(), "Create flow opened");
        self.state.create_flow = Some(flow);
        self.navigate(view, ViewParams::default());
    }

    /// Fetch a record fresh and show its detail view
    async fn open_detail(&mut self, kind: RecordKind, id: String) {
        if self.fetch_record(kind, &id).await {
            let view = match kind {
                RecordKind::Product => View::ProductDetail,
                RecordKind::Order => View::OrderDetail,
            };
            self.navigate(view, Self::params_for(kind, id));
        }
    }

    /// Fetch a record fresh and open the edit form prefilled with it
    async fn start_edit(&mut self, kind: RecordKind, id: String) {
        if !self.fetch_record(kind, &id).await {
            return;
        }
        let params = Self::params_for(kind, id);
        let session = match kind {
            RecordKind::Product => self
                .state
                .products
                .iter()
                .find(|p| Some(&p.id) == params.product_id.as_ref())
                .map(EditSession::for_product),
            RecordKind::Order => self
                .state
                .orders
                .iter()
                .find(|o| Some(&o.id) == params.order_id.as_ref())
                .map(EditSession::for_order),
        };
        let Some(session) = session else {
            return;
        };
        let view = match kind {
            RecordKind::Product => View::ProductEdit,
            RecordKind::Order => View::OrderEdit,
        };
        self.state.edit_session = Some(session);
        self.navigate(view, params);
    }

    /// Load one record into the cached list; false when the fetch failed
    async fn fetch_record(&mut self, kind: RecordKind, id: &str) -> bool {
        let result = match kind {
            RecordKind::Product => self
                .backend
                .get_product(id)
                .await
                .map(|p| self.state.upsert_product(p)),
            RecordKind::Order => self
                .backend
                .get_order(id)
                .await
                .map(|o| self.state.upsert_order(o)),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(id, error = %err, "Failed to load {}", kind.noun());
                self.state.notifications.error(
                    format!("Failed to load {}", kind.noun()),
                    Some(err.user_message()),
                );
                if err.is_not_found() {
                    self.refresh(kind).await;
                }
                false
            }
        }
    }

    fn params_for(kind: RecordKind, id: String) -> ViewParams {
        match kind {
            RecordKind::Product => ViewParams {
                product_id: Some(id),
                ..Default::default()
            },
            RecordKind::Order => ViewParams {
                order_id: Some(id),
                ..Default::default()
            },
        }
    }

    /// Backend id of the record under focus in a list or detail view
    fn focused_record_id(&self, kind: RecordKind) -> Option<String> {
        let in_list = matches!(self.state.current_view, View::Products | View::Orders);
        match kind {
            RecordKind::Product if in_list => self.state.selected_product().map(|p| p.id.clone()),
            RecordKind::Order if in_list => self.state.selected_order().map(|o| o.id.clone()),
            RecordKind::Product => self.state.view_params.product_id.clone(),
            RecordKind::Order => self.state.view_params.order_id.clone(),
        }
    }

    /// Press Next on the wizard, or Publish on its final step
    async fn press_next(&mut self) {
        let Some(flow) = self.state.create_flow.as_mut() else {
            return;
        };
        if flow.wizard().is_last() {
            self.publish().await;
            return;
        }

        let flow_id = flow.id();
        match flow.request_advance(today()).await {
            AdvanceRequest::Moved(step) => debug!(%flow_id, step, "Advanced"),
            AdvanceRequest::Invalid => self.state.notifications.error(VALIDATION_FAILED, None),
            AdvanceRequest::CheckName { ticket, name } => {
                self.spawn_name_check(flow_id, ticket, name)
            }
            AdvanceRequest::Ignored(outcome) => debug!(%flow_id, ?outcome, "Next ignored"),
        }
    }

    /// Run the duplicate-name check off the input loop
    fn spawn_name_check(&self, flow_id: Uuid, ticket: AdvanceTicket, name: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let verdict = check_unique_name(backend.as_ref(), &name).await;
            let _ = tx.send(TaskResult::NameCheck {
                flow_id,
                ticket,
                name,
                verdict,
            });
        });
    }

    /// Validate the whole wizard and create the record
    async fn publish(&mut self) {
        let Some(flow) = self.state.create_flow.as_mut() else {
            return;
        };
        let kind = flow.kind();

        match flow.prepare_submit(today(), Utc::now()) {
            Err(SubmitBlocked::Invalid { step, fields }) => {
                debug!(step, ?fields, "Publish blocked by validation");
                self.state.notifications.error(VALIDATION_FAILED, None);
            }
            Err(SubmitBlocked::Uploading) => self.state.notifications.info(UPLOAD_IN_PROGRESS),
            Err(SubmitBlocked::NotFinalStep) => {}
            Ok(Submission::Product(product)) => match self.backend.create_product(&product).await {
                Ok(created) => {
                    info!(id = %created.id, name = %created.product_name, "Product created");
                    self.state.notifications.success(
                        "Product created successfully!",
                        format!("{} has been added to your products.", created.product_name),
                    );
                    self.finish_create(kind).await;
                }
                Err(err) => {
                    warn!(error = %err, "Failed to create product");
                    self.state
                        .notifications
                        .error("Failed to create product", Some(err.user_message()));
                }
            },
            Ok(Submission::Order(order)) => match self.backend.create_order(&order).await {
                Ok(created) => {
                    info!(id = %created.id, order_id = %created.order_id, "Order created");
                    self.state.notifications.success(
                        "Order created successfully!",
                        format!("{} has been added to your orders.", created.order_id),
                    );
                    self.finish_create(kind).await;
                }
                Err(err) => {
                    warn!(error = %err, "Failed to create order");
                    self.state
                        .notifications
                        .error("Failed to create order", Some(err.user_message()));
                }
            },
        }
    }

    async fn finish_create(&mut self, kind: RecordKind) {
        self.state.create_flow = None;
        self.refresh(kind).await;
        self.show_list(kind);
    }

    /// Validate the edit form and write it back
    async fn save_edit(&mut self) {
        let Some(session) = self.state.edit_session.as_mut() else {
            return;
        };
        if session.uploading {
            self.state.notifications.info(UPLOAD_IN_PROGRESS);
            return;
        }
        let id = session.record_id.clone();
        let kind = session.kind;

        let saved = match session.prepare(today()) {
            Err(fields) => {
                debug!(?fields, "Save blocked by validation");
                self.state.notifications.error(VALIDATION_FAILED, None);
                return;
            }
            Ok(EditPayload::Product(product)) => self
                .backend
                .update_product(&id, &product)
                .await
                .map(|updated| updated.product_name),
            Ok(EditPayload::Order(update)) => self
                .backend
                .update_order(&id, &update)
                .await
                .map(|updated| updated.order_id),
        };

        let (success, failure) = match kind {
            RecordKind::Product => ("Product updated successfully!", "Failed to update product"),
            RecordKind::Order => ("Order updated successfully!", "Failed to update order"),
        };
        match saved {
            Ok(label) => {
                info!(%id, kind = kind.noun(), "Record updated");
                self.state
                    .notifications
                    .success(success, format!("{} has been updated.", label));
                self.state.edit_session = None;
                self.refresh(kind).await;
                self.go_back();
            }
            Err(err) => {
                warn!(%id, error = %err, "Update failed");
                self.state.notifications.error(failure, Some(err.user_message()));
            }
        }
    }

    /// Upload the local file named in the image field
    fn start_upload(&mut self) {
        let (owner, form, uploading) = match self.state.current_view {
            View::ProductCreate => {
                let Some(flow) = self.state.create_flow.as_ref() else {
                    return;
                };
                if !flow.step_fields().contains(&product_fields::IMAGE) {
                    self.state.notifications.info("Images are added on the Media step");
                    return;
                }
                (flow.id(), flow.form(), flow.uploading)
            }
            View::ProductEdit => {
                let Some(session) = self.state.edit_session.as_ref() else {
                    return;
                };
                (session.id(), &session.form, session.uploading)
            }
            _ => return,
        };
        if uploading {
            self.state.notifications.info(UPLOAD_IN_PROGRESS);
            return;
        }

        let Some(path) = upload_source(form.text(product_fields::IMAGE)) else {
            self.state
                .notifications
                .info("Type a local image path in the image field first");
            return;
        };

        if let Some(flow) = self.state.create_flow.as_mut().filter(|f| f.id() == owner) {
            flow.uploading = true;
        } else if let Some(session) = self.state.edit_session.as_mut().filter(|s| s.id() == owner) {
            session.uploading = true;
        }
        info!(path = %path.display(), "Uploading image");
        self.spawn_upload(owner, path);
    }

    fn spawn_upload(&self, owner: Uuid, path: PathBuf) {
        let backend = Arc::clone(&self.backend);
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = backend.upload_image(&path).await;
            let _ = tx.send(TaskResult::Upload { owner, result });
        });
    }

    fn ask_delete(&mut self, kind: RecordKind) {
        let Some(id) = self.focused_record_id(kind) else {
            return;
        };
        let label = match kind {
            RecordKind::Product => self
                .state
                .products
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.product_name.clone()),
            RecordKind::Order => self
                .state
                .orders
                .iter()
                .find(|o| o.id == id)
                .map(|o| o.order_id.clone()),
        };
        self.state.pending_delete = Some(PendingDelete {
            kind,
            label: label.unwrap_or_else(|| id.clone()),
            id,
        });
    }

    async fn confirm_delete(&mut self, pending: PendingDelete) {
        let result = match pending.kind {
            RecordKind::Product => self.backend.delete_product(&pending.id).await,
            RecordKind::Order => self.backend.delete_order(&pending.id).await,
        };
        self.state.pending_delete = None;

        let kind = pending.kind;
        match result {
            Ok(()) => {
                info!(id = %pending.id, kind = kind.noun(), "Record deleted");
                let (title, detail) = match kind {
                    RecordKind::Product => (
                        "Product deleted successfully!",
                        "The product has been permanently removed.",
                    ),
                    RecordKind::Order => (
                        "Order deleted successfully!",
                        "The order has been permanently removed.",
                    ),
                };
                self.state.notifications.success(title, detail);
                self.refresh(kind).await;
                self.show_list(kind);
            }
            Err(err) => {
                warn!(id = %pending.id, error = %err, "Delete failed");
                self.state.notifications.error(
                    format!("Failed to delete {}", kind.noun()),
                    Some(err.user_message()),
                );
            }
        }
    }

    /// Copy the focused record's identifier: product id, or the order number
    fn copy_focused_id(&mut self, kind: RecordKind) {
        let Some(id) = self.focused_record_id(kind) else {
            return;
        };
        let text = match kind {
            RecordKind::Product => id,
            RecordKind::Order => self
                .state
                .orders
                .iter()
                .find(|o| o.id == id)
                .map(|o| o.order_id.clone())
                .unwrap_or(id),
        };

        let noun = match kind {
            RecordKind::Product => "Product",
            RecordKind::Order => "Order",
        };
        match self.copy_to_clipboard(&text) {
            Ok(()) => self
                .state
                .notifications
                .info(format!("{} ID copied to clipboard", noun)),
            Err(err) => {
                warn!("Clipboard unavailable: {err}");
                self.state
                    .notifications
                    .error(format!("Failed to copy {} ID", kind.noun()), None);
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    fn save_sort_preferences(&mut self) {
        self.config.product_sort_field = Some(self.state.product_sort_field.as_str().to_string());
        self.config.product_sort_direction =
            Some(self.state.product_sort_direction.as_str().to_string());
        self.config.order_sort_field = Some(self.state.order_sort_field.as_str().to_string());
        self.config.order_sort_direction =
            Some(self.state.order_sort_direction.as_str().to_string());

        if self.persist_config {
            if let Err(err) = self.config.save() {
                warn!("Failed to save sort preferences: {err}");
            }
        }
    }
}

/// Local file named by the image field, unless it already holds a web URL
fn upload_source(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match url::Url::parse(text) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => None,
        _ => Some(PathBuf::from(text)),
    }
}
