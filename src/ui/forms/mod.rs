//! Form rendering

mod field_renderer;
mod registration_form;

pub use registration_form::draw_registration;
