//! Field-level validation rules

use super::field::{FieldDefinition, FieldType, FieldValue};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use uuid::Uuid;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("valid phone pattern"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

/// Field id -> message
pub type ValidationErrors = HashMap<Uuid, String>;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Check one field against its entered value. Returns at most one message.
pub fn validate_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty());

    let Some(value) = value else {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    };

    match (&field.field_type, value.as_text()) {
        (FieldType::Email, Some(text)) if !is_valid_email(text) => Some(INVALID_EMAIL.to_string()),
        (FieldType::Phone, Some(text)) if !is_valid_phone(text) => Some(INVALID_PHONE.to_string()),
        _ => None,
    }
}

/// Validate every field; an empty result means the draft may be submitted
pub fn validate_all(
    fields: &[FieldDefinition],
    draft: &HashMap<Uuid, FieldValue>,
) -> ValidationErrors {
    fields
        .iter()
        .filter_map(|field| {
            validate_field(field, draft.get(&field.id)).map(|message| (field.id, message))
        })
        .collect()
}
