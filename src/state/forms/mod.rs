//! Form domain layer
//!
//! Dynamic form definitions loaded from the store, the per-session draft,
//! field validation and the label-keyed submission transform.

mod field;
mod form_state;
mod submission;
mod validation;

pub use field::{FieldDefinition, FieldType, FieldValue, FormDefinition};
pub use form_state::{FocusTarget, Form, FormPhase, RegistrationForm};
pub use submission::Submission;
