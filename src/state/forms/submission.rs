//! Packaging validated form values into backend request bodies
//!
//! These run after full-form validation has passed; a `None` here means the
//! form was not actually valid and nothing must be sent.

use super::form_state::{order_fields, product_fields, FormValues};
use crate::state::records::{
    calendar_date, DeliveryStatus, NewOrder, NewProduct, OrderUpdate, PaymentStatus, ProductStatus,
};
use chrono::{DateTime, Utc};

/// Client-visible order identifier generated at submission time
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    format!("ORD-{}", now.timestamp_millis())
}

/// Product body for create (POST) and replace (PUT)
pub fn product_payload(form: &FormValues) -> Option<NewProduct> {
    use product_fields::*;

    Some(NewProduct {
        product_name: form.text(NAME).trim().to_string(),
        product_sku: form.text(SKU).trim().to_uppercase(),
        product_category: form.text(CATEGORY).trim().to_string(),
        description: non_empty(form.text(DESCRIPTION)),
        price: form.text(PRICE).trim().parse().ok()?,
        stock: parse_count(form.text(STOCK))?,
        status: ProductStatus::parse(form.text(STATUS))?,
        image: non_empty(form.text(IMAGE)),
    })
}

/// Order body for create (POST)
pub fn order_payload(form: &FormValues, now: DateTime<Utc>) -> Option<NewOrder> {
    let update = order_update(form)?;
    Some(NewOrder {
        order_id: generate_order_id(now),
        client_name: update.client_name,
        products: update.products,
        quantity: update.quantity,
        delivery_address: update.delivery_address,
        expected_delivery_date: update.expected_delivery_date,
        payment_status: update.payment_status,
        delivery_status: update.delivery_status,
    })
}

/// Order body for update (PATCH)
pub fn order_update(form: &FormValues) -> Option<OrderUpdate> {
    use order_fields::*;

    let products = form.field(PRODUCTS)?.as_id_list();
    if products.is_empty() {
        return None;
    }

    Some(OrderUpdate {
        client_name: form.text(CLIENT_NAME).trim().to_string(),
        products,
        quantity: parse_count(form.text(QUANTITY))?,
        delivery_address: form.text(DELIVERY_ADDRESS).trim().to_string(),
        expected_delivery_date: calendar_date::parse(form.text(DELIVERY_DATE))?,
        payment_status: PaymentStatus::parse(form.text(PAYMENT_STATUS))?,
        delivery_status: DeliveryStatus::parse(form.text(DELIVERY_STATUS))?,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_count(value: &str) -> Option<u32> {
    let n: f64 = value.trim().parse().ok()?;
    (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::form_state::{order_form, product_form};
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_product_payload_normalizes_sku() {
        let mut form = product_form();
        form.set_value(product_fields::NAME, " Widget X ");
        form.set_value(product_fields::SKU, "wx-01");
        form.set_value(product_fields::CATEGORY, "Tools");
        form.set_value(product_fields::PRICE, "12.5");
        form.set_value(product_fields::STOCK, "30");

        let payload = product_payload(&form).unwrap();
        assert_eq!(
            payload,
            NewProduct {
                product_name: "Widget X".into(),
                product_sku: "WX-01".into(),
                product_category: "Tools".into(),
                description: None,
                price: 12.5,
                stock: 30,
                status: ProductStatus::Active,
                image: None,
            }
        );
    }

    #[test]
    fn test_product_payload_rejects_unparsed_price() {
        let mut form = product_form();
        form.set_value(product_fields::PRICE, "cheap");
        assert!(product_payload(&form).is_none());
    }

    #[test]
    fn test_order_payload_generates_order_id() {
        let mut form = order_form();
        form.set_value(order_fields::CLIENT_NAME, "Ada");
        form.set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
        form.set_value(order_fields::DELIVERY_DATE, "2030-01-02");
        form.set_value(order_fields::PRODUCTS, "4, 9");

        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let payload = order_payload(&form, now).unwrap();
        assert_eq!(payload.order_id, "ORD-1700000000123");
        assert_eq!(payload.products, vec!["4".to_string(), "9".to_string()]);
        assert_eq!(payload.quantity, 2);
        assert_eq!(
            payload.expected_delivery_date,
            NaiveDate::from_ymd_opt(2030, 1, 2).unwrap()
        );
        assert_eq!(payload.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_order_update_requires_products() {
        let mut form = order_form();
        form.set_value(order_fields::CLIENT_NAME, "Ada");
        form.set_value(order_fields::DELIVERY_ADDRESS, "1 Main St");
        form.set_value(order_fields::DELIVERY_DATE, "2030-01-02");
        assert!(order_update(&form).is_none());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count(" 0 "), Some(0));
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("-1"), None);
    }
}
