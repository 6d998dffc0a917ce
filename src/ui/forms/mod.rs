//! Form rendering module
//!
//! - `field_renderer`: field widgets, validation messages and the image line
//! - `wizard`: multi-step create flows
//! - `edit_form`: single-page edit forms

mod edit_form;
mod field_renderer;
mod wizard;

pub use edit_form::draw_edit;
pub use wizard::draw_create;
