//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for form commands (save, upload, back). Ctrl is accepted everywhere.
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Next/Publish/Save shortcut shown on buttons and in the status bar
#[cfg(target_os = "macos")]
pub const SAVE_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Image upload shortcut
#[cfg(target_os = "macos")]
pub const UPLOAD_SHORTCUT: &str = "Cmd+U";

#[cfg(not(target_os = "macos"))]
pub const UPLOAD_SHORTCUT: &str = "Ctrl+U";
