//! Product and order records as exchanged with the backend
//!
//! The backend has served several shapes for the same record over time
//! (numeric vs string prices, epoch seconds vs ISO timestamps, product ids vs
//! embedded product objects). Decoding accepts all of them and converts to a
//! single canonical representation; encoding always writes the canonical one.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Product publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Draft,
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    /// Values selectable in forms, in display order
    pub const OPTIONS: [&'static str; 3] = ["active", "inactive", "draft"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Draft => "Draft",
            Self::Unknown => "Unknown",
        }
    }
}

/// Payment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub const OPTIONS: [&'static str; 3] = ["paid", "pending", "refunded"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

/// Delivery state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    #[serde(alias = "canceled")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub const OPTIONS: [&'static str; 4] = ["pending", "shipped", "delivered", "cancelled"];

    /// Every status except `Unknown`, in filter order
    pub const KNOWN: [DeliveryStatus; 4] = [
        Self::Pending,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_sku: String,
    #[serde(default)]
    pub product_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stock: u32,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "createdAt", with = "epoch_seconds", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "product_refs")]
    pub products: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(
        default,
        serialize_with = "calendar_date::serialize_optional",
        deserialize_with = "calendar_date::deserialize_optional"
    )]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(with = "epoch_seconds", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Displayed order total: quantity times the number of products
    pub fn total_amount(&self) -> f64 {
        f64::from(self.quantity) * self.products.len() as f64
    }
}

/// Body for creating or replacing a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub product_name: String,
    pub product_sku: String,
    pub product_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body for creating an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub order_id: String,
    pub client_name: String,
    pub products: Vec<String>,
    pub quantity: u32,
    pub delivery_address: String,
    #[serde(serialize_with = "calendar_date::serialize")]
    pub expected_delivery_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
}

/// Body for patching an order; `order_id` and `created_at` are read-only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderUpdate {
    pub client_name: String,
    pub products: Vec<String>,
    pub quantity: u32,
    pub delivery_address: String,
    #[serde(serialize_with = "calendar_date::serialize")]
    pub expected_delivery_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
}

/// Format an amount as US dollars, e.g. `$1,234.50`
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Format a timestamp the way list columns show it, e.g. `07 Mar, 2025`
pub fn format_day(dt: &DateTime<Utc>) -> String {
    dt.format("%d %b, %Y").to_string()
}

/// Epoch-second timestamps
///
/// Values above 10^11 are taken to be milliseconds; no plausible second
/// count reaches that range.
pub mod epoch_seconds {
    use super::*;

    const MILLIS_THRESHOLD: i64 = 100_000_000_000;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(dt.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Int(n) => from_number(n),
            Raw::Float(f) => from_number(f as i64),
            Raw::Text(t) => parse(&t),
        };
        parsed.ok_or_else(|| de::Error::custom("invalid timestamp"))
    }

    /// Parse a numeric or RFC 3339 timestamp string
    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return from_number(n);
        }
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn from_number(n: i64) -> Option<DateTime<Utc>> {
        if n.abs() >= MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        }
    }
}

/// Calendar dates written as `YYYY-MM-DD`
pub mod calendar_date {
    use super::*;

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn serialize_optional<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Unparseable or missing dates decode as `None` rather than failing the record
    pub fn deserialize_optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(text)) => parse(&text),
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .and_then(|secs| epoch_seconds::parse(&secs.to_string()))
                .map(|dt| dt.date_naive()),
            _ => None,
        })
    }

    /// Parse `YYYY-MM-DD` or a full RFC 3339 timestamp
    pub fn parse(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
    }
}

/// Product references inside an order: plain ids or embedded product objects
fn product_refs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ref {
        Id(String),
        Number(i64),
        Object { id: serde_json::Value },
    }

    let refs = Option::<Vec<Ref>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(refs
        .into_iter()
        .filter_map(|r| match r {
            Ref::Id(id) => Some(id),
            Ref::Number(n) => Some(n.to_string()),
            Ref::Object { id } => match id {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            },
        })
        .collect())
}

/// Numbers that may arrive as JSON numbers or numeric strings
mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match NumOrText::deserialize(deserializer)? {
            NumOrText::Int(n) => n.to_string(),
            NumOrText::Float(f) => f.to_string(),
            NumOrText::Text(t) => t,
        })
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumOrText::deserialize(deserializer)? {
            NumOrText::Int(n) => Ok(n as f64),
            NumOrText::Float(f) => Ok(f),
            NumOrText::Text(t) => t
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid number: {t}"))),
        }
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = float(deserializer)?;
        if value < 0.0 || value > f64::from(u32::MAX) {
            return Err(de::Error::custom(format!("count out of range: {value}")));
        }
        Ok(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_product_decodes_numeric_created_at() {
        let json = r#"{
            "id": "7",
            "product_name": "Widget X",
            "product_sku": "WX-1",
            "product_category": "Tools",
            "price": 12.5,
            "stock": 30,
            "status": "active",
            "createdAt": 1700000000
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.created_at.timestamp(), 1_700_000_000);
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_product_decodes_string_price_and_iso_created_at() {
        let json = r#"{
            "id": 3,
            "product_name": "Lamp",
            "price": "49.99",
            "stock": "4",
            "status": "archived",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "3");
        assert_eq!(product.price, 49.99);
        assert_eq!(product.stock, 4);
        assert_eq!(product.status, ProductStatus::Unknown);
        assert_eq!(product.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_product_encodes_created_at_as_epoch_seconds() {
        let product = Product {
            id: "1".into(),
            product_name: "A".into(),
            product_sku: "A-1".into(),
            product_category: "C".into(),
            description: None,
            price: 1.0,
            stock: 1,
            status: ProductStatus::Draft,
            image: None,
            created_at: Utc.timestamp_opt(1_650_000_000, 0).unwrap(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["createdAt"], 1_650_000_000);
        assert_eq!(value["status"], "draft");
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_order_decodes_product_objects_and_canceled_alias() {
        let json = r#"{
            "id": "12",
            "order_id": "ORD-1700000000000",
            "client_name": "Ada",
            "products": [{"id": "4", "product_name": "Lamp"}, "9"],
            "quantity": 2,
            "delivery_address": "1 Main St",
            "expected_delivery_date": "2030-01-15T00:00:00.000Z",
            "payment_status": "paid",
            "delivery_status": "canceled",
            "created_at": 1700000000
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.products, vec!["4".to_string(), "9".to_string()]);
        assert_eq!(order.delivery_status, DeliveryStatus::Cancelled);
        assert_eq!(
            order.expected_delivery_date,
            NaiveDate::from_ymd_opt(2030, 1, 15)
        );
        assert_eq!(order.total_amount(), 4.0);
    }

    #[test]
    fn test_order_millisecond_created_at() {
        let json = r#"{"id": "1", "created_at": 1700000000000}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.created_at.timestamp(), 1_700_000_000);
        assert_eq!(order.expected_delivery_date, None);
    }

    #[test]
    fn test_new_order_serializes_plain_date() {
        let order = NewOrder {
            order_id: "ORD-1".into(),
            client_name: "Ada".into(),
            products: vec!["1".into()],
            quantity: 1,
            delivery_address: "Street".into(),
            expected_delivery_date: NaiveDate::from_ymd_opt(2031, 2, 3).unwrap(),
            payment_status: PaymentStatus::Pending,
            delivery_status: DeliveryStatus::Cancelled,
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["expected_delivery_date"], "2031-02-03");
        assert_eq!(value["delivery_status"], "cancelled");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(4.0), "$4.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_day() {
        let dt = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(format_day(&dt), "14 Nov, 2023");
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(ProductStatus::parse("Active"), Some(ProductStatus::Active));
        assert_eq!(DeliveryStatus::parse("canceled"), Some(DeliveryStatus::Cancelled));
        assert_eq!(PaymentStatus::parse("nope"), None);
    }
}
