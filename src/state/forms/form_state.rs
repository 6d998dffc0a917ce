//! Form value container and the product/order form definitions

use super::field::{FieldKind, FieldRule, FormField};
use super::schema;
use crate::state::records::{DeliveryStatus, Order, PaymentStatus, Product, ProductStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Field name to message. Derived from validation, never authoritative.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Trait for common focus navigation over a set of inputs
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Field names of the product form
pub mod product_fields {
    pub const NAME: &str = "product_name";
    pub const SKU: &str = "product_sku";
    pub const CATEGORY: &str = "product_category";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const STOCK: &str = "stock";
    pub const STATUS: &str = "status";
    pub const IMAGE: &str = "image";
}

/// Field names of the order form
pub mod order_fields {
    pub const CLIENT_NAME: &str = "client_name";
    pub const DELIVERY_ADDRESS: &str = "delivery_address";
    pub const DELIVERY_DATE: &str = "expected_delivery_date";
    pub const PRODUCTS: &str = "products";
    pub const QUANTITY: &str = "quantity";
    pub const PAYMENT_STATUS: &str = "payment_status";
    pub const DELIVERY_STATUS: &str = "delivery_status";
}

/// All values, errors and touch state of one record being edited
#[derive(Debug, Clone)]
pub struct FormValues {
    fields: Vec<FormField>,
    errors: FieldErrors,
}

impl FormValues {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            errors: FieldErrors::new(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Current text of a field, empty for unknown names
    pub fn text(&self, name: &str) -> &str {
        self.field(name).map(FormField::as_text).unwrap_or("")
    }

    /// Programmatic `setValue`
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(name) {
            field.set_text(value.into());
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Attach an error that did not come from schema validation
    pub fn set_manual_error(&mut self, name: &'static str, message: impl Into<String>) {
        self.errors.insert(name, message.into());
    }

    /// Re-run validation over `names`, replacing their previous errors.
    /// Returns the number of failing fields among `names`.
    pub fn validate_fields(&mut self, names: &[&'static str], today: NaiveDate) -> usize {
        let fresh = schema::validate(self, Some(names), today);
        self.errors.retain(|name, _| !names.contains(name));
        let failing = fresh.len();
        self.errors.extend(fresh);
        failing
    }

    /// Re-run validation over every field. Returns the number of failing fields.
    pub fn validate_all(&mut self, today: NaiveDate) -> usize {
        self.errors = schema::validate(self, None, today);
        self.errors.len()
    }

    /// True when every required field among `names` holds some input
    pub fn required_filled(&self, names: &[&'static str]) -> bool {
        names
            .iter()
            .filter_map(|name| self.field(name))
            .all(|f| !f.rule.required || !f.is_blank())
    }
}

/// Empty product form with the default values of a new product
pub fn product_form() -> FormValues {
    use product_fields::*;

    FormValues::new(vec![
        FormField::input(
            NAME,
            "Product Name",
            FieldKind::Text,
            FieldRule::required("Product name is required"),
        ),
        FormField::input(
            SKU,
            "SKU",
            FieldKind::Text,
            FieldRule::required("Product SKU is required"),
        ),
        FormField::input(
            CATEGORY,
            "Category",
            FieldKind::Text,
            FieldRule::required("Product category is required"),
        ),
        FormField::multiline(DESCRIPTION, "Description (optional)", FieldRule::optional()),
        FormField::input(
            PRICE,
            "Price",
            FieldKind::Decimal,
            FieldRule::at_least(0.0, "Price is required", "Price must be positive"),
        )
        .with_text("0"),
        FormField::input(
            STOCK,
            "Stock",
            FieldKind::Integer,
            FieldRule::at_least(0.0, "Stock is required", "Stock must be non-negative"),
        )
        .with_text("0"),
        FormField::choice(
            STATUS,
            "Status",
            &ProductStatus::OPTIONS,
            ProductStatus::Active.as_str(),
        ),
        FormField::input(
            IMAGE,
            "Image URL or local file path",
            FieldKind::Url,
            FieldRule::optional().invalid("Must be a valid URL"),
        ),
    ])
}

/// Product form prefilled from an existing record
pub fn product_form_from(product: &Product) -> FormValues {
    use product_fields::*;

    let mut form = product_form();
    form.set_value(NAME, product.product_name.clone());
    form.set_value(SKU, product.product_sku.clone());
    form.set_value(CATEGORY, product.product_category.clone());
    form.set_value(DESCRIPTION, product.description.clone().unwrap_or_default());
    form.set_value(PRICE, format_number(product.price));
    form.set_value(STOCK, product.stock.to_string());
    form.set_value(STATUS, product.status.as_str());
    form.set_value(IMAGE, product.image.clone().unwrap_or_default());
    clear_touched(&mut form);
    form
}

/// Empty order form with the default values of a new order
pub fn order_form() -> FormValues {
    use order_fields::*;

    FormValues::new(vec![
        FormField::input(
            CLIENT_NAME,
            "Client Name",
            FieldKind::Text,
            FieldRule::required("Client name is required"),
        ),
        FormField::input(
            DELIVERY_ADDRESS,
            "Delivery Address",
            FieldKind::Text,
            FieldRule::required("Delivery address is required"),
        ),
        FormField::input(
            DELIVERY_DATE,
            "Expected Delivery Date (YYYY-MM-DD)",
            FieldKind::Date,
            FieldRule::required("Expected delivery date is required")
                .invalid("Expected delivery date cannot be in the past"),
        ),
        FormField::input(
            PRODUCTS,
            "Product IDs (comma separated)",
            FieldKind::IdList,
            FieldRule::required("At least one product must be selected"),
        ),
        FormField::input(
            QUANTITY,
            "Quantity",
            FieldKind::Integer,
            FieldRule::at_least(1.0, "Quantity is required", "Quantity must be at least 1"),
        )
        .with_text("2"),
        FormField::choice(
            PAYMENT_STATUS,
            "Payment Status",
            &PaymentStatus::OPTIONS,
            PaymentStatus::Pending.as_str(),
        ),
        FormField::choice(
            DELIVERY_STATUS,
            "Delivery Status",
            &DeliveryStatus::OPTIONS,
            DeliveryStatus::Pending.as_str(),
        ),
    ])
}

/// Order form prefilled from an existing record
pub fn order_form_from(order: &Order) -> FormValues {
    use order_fields::*;

    let mut form = order_form();
    form.set_value(CLIENT_NAME, order.client_name.clone());
    form.set_value(DELIVERY_ADDRESS, order.delivery_address.clone());
    form.set_value(
        DELIVERY_DATE,
        order
            .expected_delivery_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    form.set_value(PRODUCTS, order.products.join(", "));
    form.set_value(QUANTITY, order.quantity.to_string());
    form.set_value(PAYMENT_STATUS, order.payment_status.as_str());
    form.set_value(DELIVERY_STATUS, order.delivery_status.as_str());
    clear_touched(&mut form);
    form
}

fn clear_touched(form: &mut FormValues) {
    for field in &mut form.fields {
        field.touched = false;
    }
}

/// Render a price without a trailing `.0` for whole amounts
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
