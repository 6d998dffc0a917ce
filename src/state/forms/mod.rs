//! Form domain layer
//!
//! Type-safe form values, schema validation and the request bodies built
//! from them. Used by the create wizards and the edit views.

mod field;
mod form_state;
pub mod schema;
pub mod submission;

pub use field::FormField;
pub use form_state::{
    order_fields, order_form, order_form_from, product_fields, product_form, product_form_from,
    Form, FormValues,
};
