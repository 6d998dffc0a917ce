//! Reusable UI components

mod button;
mod dialog;
mod notifications;

pub use button::{render_button, ButtonStyle, BUTTON_HEIGHT};
pub use dialog::{render_confirm_dialog, render_error_dialog};
pub use notifications::render_notifications;
