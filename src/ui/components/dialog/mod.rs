//! Dialog components for TUI

mod base;
mod error_dialog;
mod message_panel;

pub use base::centered_rect;
pub use error_dialog::render_error_dialog;
pub use message_panel::render_message_panel;
