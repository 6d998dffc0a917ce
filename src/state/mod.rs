//! Application state module

mod app_state;
pub mod flow;
pub mod forms;
pub mod indicators;
pub mod notifications;
pub mod records;
pub mod wizard;

pub use app_state::*;
pub use flow::{CreateFlow, EditSession, RecordKind};
pub use notifications::{NotificationLevel, Notifications};
pub use records::{
    DeliveryStatus, NewOrder, NewProduct, Order, OrderUpdate, PaymentStatus, Product, ProductStatus,
};
