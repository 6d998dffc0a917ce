//! Schema-driven validation of form fields

use super::field::{FieldKind, FormField};
use super::form_state::{FieldErrors, FormValues};
use crate::state::records::calendar_date;
use chrono::NaiveDate;

/// Shown when a whole number does not fit the record's count fields
pub const NUMBER_TOO_LARGE: &str = "Number is too large";

/// Validate `names` (or every field when `None`) and collect the failures.
///
/// `today` is the reference date for "not in the past" checks.
pub fn validate(
    form: &FormValues,
    names: Option<&[&'static str]>,
    today: NaiveDate,
) -> FieldErrors {
    form.fields()
        .iter()
        .filter(|f| names.map_or(true, |names| names.contains(&f.name)))
        .filter_map(|f| check_field(f, today).map(|message| (f.name, message)))
        .collect()
}

/// Check a single field against its rule
pub fn check_field(field: &FormField, today: NaiveDate) -> Option<String> {
    let rule = &field.rule;
    let raw = field.as_text().trim();

    if field.is_blank() {
        return rule.required.then(|| rule.required_message.to_string());
    }

    let failure = match field.kind {
        FieldKind::Text | FieldKind::Choice => None,
        FieldKind::Decimal => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => below_min(n, rule.min).then_some(rule.invalid_message),
            _ => Some(rule.required_message),
        },
        FieldKind::Integer => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() && n > f64::from(u32::MAX) => Some(NUMBER_TOO_LARGE),
            Ok(n) if n.is_finite() => {
                (n.fract() != 0.0 || below_min(n, rule.min)).then_some(rule.invalid_message)
            }
            _ => Some(rule.required_message),
        },
        FieldKind::Date => match calendar_date::parse(raw) {
            Some(date) if date < today => Some(rule.invalid_message),
            Some(_) => None,
            None => Some(rule.required_message),
        },
        FieldKind::Url => url::Url::parse(raw).is_err().then_some(rule.invalid_message),
        FieldKind::IdList => field
            .as_id_list()
            .is_empty()
            .then_some(rule.required_message),
    };

    failure.map(str::to_string)
}

fn below_min(value: f64, min: Option<f64>) -> bool {
    min.is_some_and(|min| value < min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::form_state::{order_fields, order_form, product_fields, product_form};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn error_for(form: &FormValues, name: &'static str) -> Option<String> {
        validate(form, Some(&[name]), today()).remove(name)
    }

    #[test]
    fn test_empty_product_form_errors() {
        let form = product_form();
        let errors = validate(&form, None, today());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[product_fields::NAME], "Product name is required");
        assert_eq!(errors[product_fields::SKU], "Product SKU is required");
        assert_eq!(errors[product_fields::CATEGORY], "Product category is required");
    }

    #[test]
    fn test_price_rules() {
        let mut form = product_form();
        form.set_value(product_fields::PRICE, "-1");
        assert_eq!(
            error_for(&form, product_fields::PRICE).as_deref(),
            Some("Price must be positive")
        );
        form.set_value(product_fields::PRICE, "abc");
        assert_eq!(error_for(&form, product_fields::PRICE).as_deref(), Some("Price is required"));
        form.set_value(product_fields::PRICE, "19.99");
        assert_eq!(error_for(&form, product_fields::PRICE), None);
        form.set_value(product_fields::PRICE, "");
        assert_eq!(error_for(&form, product_fields::PRICE).as_deref(), Some("Price is required"));
    }

    #[test]
    fn test_stock_must_be_whole_and_non_negative() {
        let mut form = product_form();
        form.set_value(product_fields::STOCK, "2.5");
        assert_eq!(
            error_for(&form, product_fields::STOCK).as_deref(),
            Some("Stock must be non-negative")
        );
        form.set_value(product_fields::STOCK, "-3");
        assert!(error_for(&form, product_fields::STOCK).is_some());
        form.set_value(product_fields::STOCK, "7");
        assert_eq!(error_for(&form, product_fields::STOCK), None);
    }

    #[test]
    fn test_counts_above_u32_are_rejected() {
        let mut form = product_form();
        form.set_value(product_fields::STOCK, "5000000000");
        assert_eq!(
            error_for(&form, product_fields::STOCK).as_deref(),
            Some(NUMBER_TOO_LARGE)
        );
        form.set_value(product_fields::STOCK, "4294967295");
        assert_eq!(error_for(&form, product_fields::STOCK), None);

        let mut order = order_form();
        order.set_value(order_fields::QUANTITY, "5000000000");
        assert_eq!(
            error_for(&order, order_fields::QUANTITY).as_deref(),
            Some(NUMBER_TOO_LARGE)
        );
    }

    #[test]
    fn test_image_url_optional_but_checked() {
        let mut form = product_form();
        assert_eq!(error_for(&form, product_fields::IMAGE), None);
        form.set_value(product_fields::IMAGE, "/tmp/photo.png");
        assert_eq!(error_for(&form, product_fields::IMAGE).as_deref(), Some("Must be a valid URL"));
        form.set_value(product_fields::IMAGE, "https://cdn.example.com/a.png");
        assert_eq!(error_for(&form, product_fields::IMAGE), None);
    }

    #[test]
    fn test_delivery_date_rules() {
        let mut form = order_form();
        assert_eq!(
            error_for(&form, order_fields::DELIVERY_DATE).as_deref(),
            Some("Expected delivery date is required")
        );
        form.set_value(order_fields::DELIVERY_DATE, "2025-05-31");
        assert_eq!(
            error_for(&form, order_fields::DELIVERY_DATE).as_deref(),
            Some("Expected delivery date cannot be in the past")
        );
        form.set_value(order_fields::DELIVERY_DATE, "2025-06-01");
        assert_eq!(error_for(&form, order_fields::DELIVERY_DATE), None);
        form.set_value(order_fields::DELIVERY_DATE, "next week");
        assert_eq!(
            error_for(&form, order_fields::DELIVERY_DATE).as_deref(),
            Some("Expected delivery date is required")
        );
    }

    #[test]
    fn test_products_and_quantity_rules() {
        let mut form = order_form();
        form.set_value(order_fields::PRODUCTS, " , ,");
        assert_eq!(
            error_for(&form, order_fields::PRODUCTS).as_deref(),
            Some("At least one product must be selected")
        );
        form.set_value(order_fields::PRODUCTS, "4");
        assert_eq!(error_for(&form, order_fields::PRODUCTS), None);

        form.set_value(order_fields::QUANTITY, "0");
        assert_eq!(
            error_for(&form, order_fields::QUANTITY).as_deref(),
            Some("Quantity must be at least 1")
        );
        form.set_value(order_fields::QUANTITY, "");
        assert_eq!(
            error_for(&form, order_fields::QUANTITY).as_deref(),
            Some("Quantity is required")
        );
    }

    #[test]
    fn test_whitespace_client_name_is_blank() {
        let mut form = order_form();
        form.set_value(order_fields::CLIENT_NAME, "   ");
        assert_eq!(
            error_for(&form, order_fields::CLIENT_NAME).as_deref(),
            Some("Client name is required")
        );
    }

    #[test]
    fn test_subset_ignores_other_fields() {
        let form = order_form();
        let errors = validate(&form, Some(&[order_fields::QUANTITY]), today());
        assert!(errors.is_empty());
    }
}
