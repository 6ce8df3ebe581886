//! Application state module

mod app_state;
mod forms;
mod settings;

pub use app_state::*;
pub use forms::*;
pub use settings::*;
