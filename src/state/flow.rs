//! Create and edit flows
//!
//! A [`CreateFlow`] owns the form values and wizard of one record being
//! created. It runs the local part of each step gate itself and tells the
//! caller when the remote duplicate-name check is needed; the caller runs the
//! check in the background and feeds the verdict back through
//! [`CreateFlow::apply_name_verdict`].
//!
//! An [`EditSession`] is the single-page counterpart for existing records.

use super::forms::{
    order_form, order_form_from, product_fields, product_form, product_form_from, submission,
    Form, FormField, FormValues,
};
use super::records::{NewOrder, NewProduct, Order, OrderUpdate, Product};
use super::wizard::{
    Advance, AdvanceTicket, GateError, StepGate, Wizard, ORDER_STEPS, PRODUCT_STEPS,
};
use crate::backend::{ApiError, BackendClientTrait};
use chrono::{DateTime, NaiveDate, Utc};
use std::future::ready;
use uuid::Uuid;

pub const VALIDATION_FAILED: &str = "Please fill in all required fields";
pub const NAME_NOT_UNIQUE: &str = "Product name must be unique";
pub const NAME_UNVERIFIED: &str = "Unable to verify product name. Please try again.";

/// Notification text for a product name that is already used
pub fn name_taken_message(name: &str) -> String {
    format!("'{}' already exists. Please rename the product and try again.", name)
}

/// Which kind of record a flow creates or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Product,
    Order,
}

impl RecordKind {
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Order => "order",
        }
    }
}

/// Result of the remote duplicate-name check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueNameVerdict {
    Available,
    Taken,
    /// The check itself failed; carries the underlying error text
    Indeterminate(String),
}

/// Ask the backend whether `name` is already used by a product
pub async fn check_unique_name(backend: &dyn BackendClientTrait, name: &str) -> UniqueNameVerdict {
    match backend.find_products_by_name(name).await {
        Ok(matches) if matches.is_empty() => UniqueNameVerdict::Available,
        Ok(matches) => {
            tracing::debug!(name, matches = matches.len(), "Product name already in use");
            UniqueNameVerdict::Taken
        }
        Err(ApiError::NotFound) => UniqueNameVerdict::Available,
        Err(err) => {
            tracing::warn!(name, error = %err, "Duplicate name check failed");
            UniqueNameVerdict::Indeterminate(err.to_string())
        }
    }
}

/// What the caller must do after pressing Next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceRequest {
    /// The step passed its local gate; now on the given step
    Moved(usize),
    /// Local validation failed; errors are attached to the fields
    Invalid,
    /// Local validation passed; run the duplicate check for `name`
    CheckName { ticket: AdvanceTicket, name: String },
    /// Nothing happened (busy, or already on the final step)
    Ignored(Advance),
}

/// Payload ready to be sent to the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Product(NewProduct),
    Order(NewOrder),
}

/// Why publishing did not produce a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    NotFinalStep,
    Uploading,
    /// Validation failed; the wizard moved to `step`, the first one holding an invalid field
    Invalid { step: usize, fields: Vec<&'static str> },
}

/// Multi-step create flow for one record
#[derive(Debug, Clone)]
pub struct CreateFlow {
    id: Uuid,
    kind: RecordKind,
    form: FormValues,
    wizard: Wizard,
    active_field: usize,
    pub scroll_offset: usize,
    pub uploading: bool,
}

impl CreateFlow {
    pub fn new_product() -> Self {
        Self::new(RecordKind::Product, product_form(), Wizard::new(PRODUCT_STEPS))
    }

    pub fn new_order() -> Self {
        Self::new(RecordKind::Order, order_form(), Wizard::new(ORDER_STEPS))
    }

    fn new(kind: RecordKind, form: FormValues, wizard: Wizard) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            form,
            wizard,
            active_field: 0,
            scroll_offset: 0,
            uploading: false,
        }
    }

    /// Identity used to route background results back to this flow
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormValues {
        &mut self.form
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Fields rendered on the current step
    pub fn step_fields(&self) -> &'static [&'static str] {
        self.wizard.current_step().fields
    }

    pub fn focused_name(&self) -> Option<&'static str> {
        self.step_fields().get(self.active_field).copied()
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        let name = self.focused_name()?;
        self.form.field_mut(name)
    }

    /// Readiness hint for the Next button: every required field of the step has input
    pub fn next_ready(&self) -> bool {
        self.form.required_filled(self.step_fields())
    }

    /// Press Next: run the current step's gate.
    ///
    /// Local gates are decided here. The unique-name gate validates locally and
    /// then hands back a ticket for the caller to run the remote check with.
    pub async fn request_advance(&mut self, today: NaiveDate) -> AdvanceRequest {
        let step = self.wizard.current_step();
        if step.gate == StepGate::FieldsThenUniqueName {
            return self.request_name_check(today);
        }

        let (fields, gate) = (step.fields, step.gate);
        let form = &mut self.form;
        let outcome = self
            .wizard
            .advance(|_| {
                ready(Ok(
                    gate == StepGate::None || form.validate_fields(fields, today) == 0,
                ))
            })
            .await;

        match outcome {
            Advance::Moved(index) => {
                self.on_step_changed();
                AdvanceRequest::Moved(index)
            }
            Advance::Blocked => AdvanceRequest::Invalid,
            other => AdvanceRequest::Ignored(other),
        }
    }

    fn request_name_check(&mut self, today: NaiveDate) -> AdvanceRequest {
        let ticket = match self.wizard.begin_advance() {
            Ok(ticket) => ticket,
            Err(outcome) => return AdvanceRequest::Ignored(outcome),
        };

        let fields = self.step_fields();
        if self.form.validate_fields(fields, today) > 0 {
            self.wizard.complete_advance(ticket, Ok(false));
            return AdvanceRequest::Invalid;
        }

        let name = self.form.text(product_fields::NAME).trim().to_string();
        AdvanceRequest::CheckName { ticket, name }
    }

    /// Apply the duplicate-check verdict for `ticket`. Stale verdicts change nothing.
    pub fn apply_name_verdict(
        &mut self,
        ticket: AdvanceTicket,
        verdict: &UniqueNameVerdict,
    ) -> Advance {
        let gate = match verdict {
            UniqueNameVerdict::Available => Ok(true),
            UniqueNameVerdict::Taken => Ok(false),
            UniqueNameVerdict::Indeterminate(reason) => Err(GateError(reason.clone())),
        };

        let outcome = self.wizard.complete_advance(ticket, gate);
        match outcome {
            Advance::Moved(_) => self.on_step_changed(),
            Advance::Blocked => self.form.set_manual_error(product_fields::NAME, NAME_NOT_UNIQUE),
            _ => {}
        }
        outcome
    }

    /// Go back one step, or jump to `target`. Never gated.
    pub fn retreat(&mut self, target: Option<usize>) {
        if self.wizard.retreat(target) {
            self.on_step_changed();
        }
    }

    /// Press Publish: validate everything and package the payload
    pub fn prepare_submit(
        &mut self,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Submission, SubmitBlocked> {
        if !self.wizard.is_last() {
            return Err(SubmitBlocked::NotFinalStep);
        }
        if self.uploading {
            return Err(SubmitBlocked::Uploading);
        }

        if self.form.validate_all(today) > 0 {
            let fields: Vec<&'static str> = self.form.errors().keys().copied().collect();
            let step = self.wizard.step_containing(&fields).unwrap_or(0);
            self.retreat(Some(step));
            return Err(SubmitBlocked::Invalid { step, fields });
        }

        let submission = match self.kind {
            RecordKind::Product => submission::product_payload(&self.form).map(Submission::Product),
            RecordKind::Order => submission::order_payload(&self.form, now).map(Submission::Order),
        };
        submission.ok_or(SubmitBlocked::Invalid {
            step: self.wizard.index(),
            fields: Vec::new(),
        })
    }

    fn on_step_changed(&mut self) {
        self.scroll_offset = 0;
        self.active_field = 0;
    }
}

impl Form for CreateFlow {
    fn field_count(&self) -> usize {
        self.step_fields().len()
    }

    fn active_field(&self) -> usize {
        self.active_field
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field = index;
    }
}

/// Payload of a saved edit
#[derive(Debug, Clone, PartialEq)]
pub enum EditPayload {
    Product(NewProduct),
    Order(OrderUpdate),
}

/// Single-page edit form for an existing record
#[derive(Debug, Clone)]
pub struct EditSession {
    id: Uuid,
    pub record_id: String,
    pub kind: RecordKind,
    pub form: FormValues,
    /// Read-only order identifier shown above the form
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub uploading: bool,
    active_field: usize,
}

impl EditSession {
    pub fn for_product(product: &Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id: product.id.clone(),
            kind: RecordKind::Product,
            form: product_form_from(product),
            order_id: None,
            created_at: product.created_at,
            uploading: false,
            active_field: 0,
        }
    }

    pub fn for_order(order: &Order) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id: order.id.clone(),
            kind: RecordKind::Order,
            form: order_form_from(order),
            order_id: Some(order.order_id.clone()),
            created_at: order.created_at,
            uploading: false,
            active_field: 0,
        }
    }

    /// Identity used to route background results back to this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        let name = self.focused_name()?;
        self.form.field_mut(name)
    }

    pub fn focused_name(&self) -> Option<&'static str> {
        self.form.fields().get(self.active_field).map(|f| f.name)
    }

    /// Validate every field and build the request body, or list the invalid fields
    pub fn prepare(&mut self, today: NaiveDate) -> Result<EditPayload, Vec<&'static str>> {
        if self.form.validate_all(today) > 0 {
            let fields: Vec<&'static str> = self.form.errors().keys().copied().collect();
            if let Some(first) = self.form.fields().iter().position(|f| fields.contains(&f.name)) {
                self.active_field = first;
            }
            return Err(fields);
        }

        let payload = match self.kind {
            RecordKind::Product => {
                submission::product_payload(&self.form).map(EditPayload::Product)
            }
            RecordKind::Order => submission::order_update(&self.form).map(EditPayload::Order),
        };
        payload.ok_or_else(Vec::new)
    }
}

impl Form for EditSession {
    fn field_count(&self) -> usize {
        self.form.fields().len()
    }

    fn active_field(&self) -> usize {
        self.active_field
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendClientTrait;
    use crate::state::forms::order_fields;
    use crate::state::records::{DeliveryStatus, PaymentStatus, ProductStatus};
    use chrono::TimeZone;
    use tokio_test::block_on;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_748_736_000_000).unwrap()
    }

    fn fill_basic_info(flow: &mut CreateFlow) {
        let form = flow.form_mut();
        form.set_value(product_fields::NAME, "Desk Lamp");
        form.set_value(product_fields::SKU, "dl-1");
        form.set_value(product_fields::CATEGORY, "Home");
    }

    fn sample_product(name: &str) -> Product {
        Product {
            id: "1".into(),
            product_name: name.into(),
            product_sku: "X".into(),
            product_category: "Home".into(),
            description: None,
            price: 1.0,
            stock: 1,
            status: ProductStatus::Active,
            image: None,
            created_at: now(),
        }
    }

    fn pass_name_check(flow: &mut CreateFlow) {
        let ticket = match block_on(flow.request_advance(today())) {
            AdvanceRequest::CheckName { ticket, .. } => ticket,
            other => panic!("expected name check, got {:?}", other),
        };
        assert_eq!(
            flow.apply_name_verdict(ticket, &UniqueNameVerdict::Available),
            Advance::Moved(1)
        );
    }

    mod unique_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_result_is_available() {
            let mut mock = MockBackendClientTrait::new();
            mock.expect_find_products_by_name()
                .withf(|name| name == "Desk Lamp")
                .times(1)
                .returning(|_| Ok(vec![]));
            assert_eq!(check_unique_name(&mock, "Desk Lamp").await, UniqueNameVerdict::Available);
        }

        #[tokio::test]
        async fn test_not_found_is_available() {
            let mut mock = MockBackendClientTrait::new();
            mock.expect_find_products_by_name()
                .returning(|_| Err(ApiError::NotFound));
            assert_eq!(check_unique_name(&mock, "Desk Lamp").await, UniqueNameVerdict::Available);
        }

        #[tokio::test]
        async fn test_match_is_taken() {
            let mut mock = MockBackendClientTrait::new();
            mock.expect_find_products_by_name()
                .returning(|name| Ok(vec![sample_product(name)]));
            assert_eq!(check_unique_name(&mock, "Desk Lamp").await, UniqueNameVerdict::Taken);
        }

        #[tokio::test]
        async fn test_server_error_is_indeterminate() {
            let mut mock = MockBackendClientTrait::new();
            mock.expect_find_products_by_name().returning(|_| {
                Err(ApiError::Status {
                    status: 500,
                    message: "boom".into(),
                })
            });
            assert_eq!(
                check_unique_name(&mock, "Desk Lamp").await,
                UniqueNameVerdict::Indeterminate("boom".into())
            );
        }

        #[test]
        fn test_taken_message() {
            assert_eq!(
                name_taken_message("Desk Lamp"),
                "'Desk Lamp' already exists. Please rename the product and try again."
            );
        }
    }

    mod product_flow {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_first_step_is_invalid() {
            let mut flow = CreateFlow::new_product();
            assert_eq!(block_on(flow.request_advance(today())), AdvanceRequest::Invalid);
            assert_eq!(flow.wizard().index(), 0);
            assert_eq!(flow.form().error(product_fields::NAME), Some("Product name is required"));
            assert!(!flow.wizard().is_busy());
        }

        #[test]
        fn test_valid_first_step_requests_name_check() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            match block_on(flow.request_advance(today())) {
                AdvanceRequest::CheckName { name, ticket } => {
                    assert_eq!(name, "Desk Lamp");
                    assert_eq!(ticket.step(), 0);
                }
                other => panic!("unexpected {:?}", other),
            }
            assert_eq!(flow.wizard().index(), 0);
            assert!(flow.wizard().is_busy());
        }

        #[test]
        fn test_next_ignored_while_check_outstanding() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            let _ = block_on(flow.request_advance(today()));
            assert_eq!(
                block_on(flow.request_advance(today())),
                AdvanceRequest::Ignored(Advance::Busy)
            );
        }

        #[test]
        fn test_available_name_advances_and_resets_focus() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            flow.set_active_field(2);
            flow.scroll_offset = 4;
            pass_name_check(&mut flow);
            assert_eq!(flow.active_field(), 0);
            assert_eq!(flow.scroll_offset, 0);
            assert_eq!(flow.focused_name(), Some(product_fields::PRICE));
        }

        #[test]
        fn test_taken_name_sets_manual_error() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            let AdvanceRequest::CheckName { ticket, .. } = block_on(flow.request_advance(today()))
            else {
                panic!("expected name check");
            };
            assert_eq!(
                flow.apply_name_verdict(ticket, &UniqueNameVerdict::Taken),
                Advance::Blocked
            );
            assert_eq!(flow.wizard().index(), 0);
            assert_eq!(flow.form().error(product_fields::NAME), Some(NAME_NOT_UNIQUE));
        }

        #[test]
        fn test_indeterminate_leaves_errors_untouched() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            let AdvanceRequest::CheckName { ticket, .. } = block_on(flow.request_advance(today()))
            else {
                panic!("expected name check");
            };
            let verdict = UniqueNameVerdict::Indeterminate("offline".into());
            let outcome = flow.apply_name_verdict(ticket, &verdict);
            assert_eq!(outcome, Advance::Unverified("offline".into()));
            assert_eq!(flow.wizard().index(), 0);
            assert!(flow.form().errors().is_empty());
        }

        #[test]
        fn test_stale_verdict_after_unmount_or_retreat_is_ignored() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            let AdvanceRequest::CheckName { ticket, .. } = block_on(flow.request_advance(today()))
            else {
                panic!("expected name check");
            };
            flow.retreat(None);
            assert_eq!(flow.apply_name_verdict(ticket, &UniqueNameVerdict::Taken), Advance::Stale);
            assert!(flow.form().error(product_fields::NAME).is_none());
            assert_eq!(flow.wizard().index(), 0);
        }

        #[test]
        fn test_middle_step_has_no_remote_check() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            pass_name_check(&mut flow);
            assert_eq!(block_on(flow.request_advance(today())), AdvanceRequest::Moved(2));
            assert!(flow.wizard().is_last());
        }

        #[test]
        fn test_values_persist_across_navigation() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            pass_name_check(&mut flow);
            flow.form_mut().set_value(product_fields::PRICE, "15");
            flow.retreat(None);
            assert_eq!(flow.form().text(product_fields::NAME), "Desk Lamp");
            assert_eq!(flow.form().text(product_fields::PRICE), "15");
        }

        #[test]
        fn test_submit_only_on_last_step() {
            let mut flow = CreateFlow::new_product();
            assert_eq!(flow.prepare_submit(today(), now()), Err(SubmitBlocked::NotFinalStep));
        }

        #[test]
        fn test_submit_refused_while_uploading() {
            let mut flow = CreateFlow::new_product();
            flow.retreat(Some(2));
            flow.uploading = true;
            assert_eq!(flow.prepare_submit(today(), now()), Err(SubmitBlocked::Uploading));
        }

        #[test]
        fn test_invalid_submit_jumps_to_first_bad_step() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            flow.form_mut().set_value(product_fields::STOCK, "-2");
            flow.form_mut().set_value(product_fields::IMAGE, "not a url");
            flow.retreat(Some(2));

            let blocked = flow.prepare_submit(today(), now()).unwrap_err();
            assert_eq!(
                blocked,
                SubmitBlocked::Invalid {
                    step: 1,
                    fields: vec![product_fields::IMAGE, product_fields::STOCK],
                }
            );
            assert_eq!(flow.wizard().index(), 1);
        }

        #[test]
        fn test_valid_submit_builds_payload() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            flow.form_mut().set_value(product_fields::PRICE, "9.5");
            flow.retreat(Some(2));

            let Ok(Submission::Product(product)) = flow.prepare_submit(today(), now()) else {
                panic!("expected product payload");
            };
            assert_eq!(product.product_sku, "DL-1");
            assert_eq!(product.price, 9.5);
            assert_eq!(product.status, ProductStatus::Active);
        }

        #[test]
        fn test_oversized_stock_is_reported_on_its_field() {
            let mut flow = CreateFlow::new_product();
            fill_basic_info(&mut flow);
            flow.form_mut().set_value(product_fields::STOCK, "5000000000");
            flow.retreat(Some(2));

            let blocked = flow.prepare_submit(today(), now()).unwrap_err();
            assert_eq!(
                blocked,
                SubmitBlocked::Invalid {
                    step: 1,
                    fields: vec![product_fields::STOCK],
                }
            );
            assert_eq!(
                flow.form().error(product_fields::STOCK),
                Some(crate::state::forms::schema::NUMBER_TOO_LARGE)
            );
        }
    }

    mod order_flow {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_first_step_gate_is_local_only() {
            let mut flow = CreateFlow::new_order();
            flow.form_mut().set_value(order_fields::CLIENT_NAME, "Ada");
            flow.form_mut().set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
            flow.form_mut().set_value(order_fields::DELIVERY_DATE, "2025-06-02");
            assert!(flow.next_ready());
            assert_eq!(block_on(flow.request_advance(today())), AdvanceRequest::Moved(1));
        }

        #[test]
        fn test_past_date_blocks_advance() {
            let mut flow = CreateFlow::new_order();
            flow.form_mut().set_value(order_fields::CLIENT_NAME, "Ada");
            flow.form_mut().set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
            flow.form_mut().set_value(order_fields::DELIVERY_DATE, "2020-01-01");
            assert_eq!(block_on(flow.request_advance(today())), AdvanceRequest::Invalid);
            assert_eq!(
                flow.form().error(order_fields::DELIVERY_DATE),
                Some("Expected delivery date cannot be in the past")
            );
        }

        #[test]
        fn test_submit_generates_order_id() {
            let mut flow = CreateFlow::new_order();
            flow.form_mut().set_value(order_fields::CLIENT_NAME, "Ada");
            flow.form_mut().set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
            flow.form_mut().set_value(order_fields::DELIVERY_DATE, "2025-06-02");
            flow.form_mut().set_value(order_fields::PRODUCTS, "3");
            flow.retreat(Some(2));

            let Ok(Submission::Order(order)) = flow.prepare_submit(today(), now()) else {
                panic!("expected order payload");
            };
            assert_eq!(order.order_id, format!("ORD-{}", now().timestamp_millis()));
            assert_eq!(order.quantity, 2);
            assert_eq!(order.delivery_status, DeliveryStatus::Pending);
        }

        #[test]
        fn test_missing_products_jumps_to_details() {
            let mut flow = CreateFlow::new_order();
            flow.form_mut().set_value(order_fields::CLIENT_NAME, "Ada");
            flow.form_mut().set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
            flow.form_mut().set_value(order_fields::DELIVERY_DATE, "2025-06-02");
            flow.retreat(Some(2));
            assert!(matches!(
                flow.prepare_submit(today(), now()),
                Err(SubmitBlocked::Invalid { step: 1, .. })
            ));
        }
    }

    mod edit_session {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_order_edit_produces_patch_body() {
            let order = Order {
                id: "8".into(),
                order_id: "ORD-5".into(),
                client_name: "Ada".into(),
                products: vec!["1".into()],
                quantity: 1,
                delivery_address: "1 Main St".into(),
                expected_delivery_date: NaiveDate::from_ymd_opt(2025, 7, 1),
                payment_status: PaymentStatus::Pending,
                delivery_status: DeliveryStatus::Pending,
                created_at: now(),
            };
            let mut session = EditSession::for_order(&order);
            session.form.set_value(order_fields::PAYMENT_STATUS, "paid");

            let Ok(EditPayload::Order(update)) = session.prepare(today()) else {
                panic!("expected order update");
            };
            assert_eq!(update.payment_status, PaymentStatus::Paid);
            assert_eq!(session.order_id.as_deref(), Some("ORD-5"));
        }

        #[test]
        fn test_invalid_edit_focuses_first_bad_field() {
            let mut session = EditSession::for_product(&sample_product("Lamp"));
            session.form.set_value(product_fields::PRICE, "-5");
            assert_eq!(session.prepare(today()), Err(vec![product_fields::PRICE]));
            assert_eq!(session.focused_name(), Some(product_fields::PRICE));
        }

        #[test]
        fn test_unknown_status_must_be_picked_before_save() {
            let mut product = sample_product("Lamp");
            product.status = ProductStatus::Unknown;
            let mut session = EditSession::for_product(&product);
            assert_eq!(session.form.text(product_fields::STATUS), "");

            assert_eq!(session.prepare(today()), Err(vec![product_fields::STATUS]));
            assert_eq!(
                session.form.error(product_fields::STATUS),
                Some("Choose one of the options")
            );
            assert_eq!(session.focused_name(), Some(product_fields::STATUS));

            session.focused_field_mut().unwrap().next_option();
            let Ok(EditPayload::Product(update)) = session.prepare(today()) else {
                panic!("expected product update");
            };
            assert_eq!(update.status, ProductStatus::Active);
        }
    }
}
