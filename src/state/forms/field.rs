//! Form and field definitions as stored remotely, plus draft values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Declared type of a field, parsed from the store's `field_type` tag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Phone,
    Textarea,
    Select,
    Checkbox,
    Radio,
    /// Unrecognized tag, rendered as a single-line input
    Other(String),
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "phone" | "tel" => Self::Phone,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            _ => Self::Other(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.tag().to_string()
    }
}

impl FieldType {
    /// The wire tag for this type
    pub fn tag(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Other(tag) => tag,
        }
    }

    /// Sub-type hint shown on single-line inputs
    pub fn input_hint(&self) -> &str {
        match self {
            Self::Phone => "tel",
            other => other.tag(),
        }
    }

    /// Whether the field is answered by picking from its option list
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }
}

/// A dynamic form's identity and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Shown on the confirmation panel when the form has no message of its own
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your submission has been received.";

impl FormDefinition {
    pub fn success_message_or_default(&self) -> &str {
        match self.success_message.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => DEFAULT_SUCCESS_MESSAGE,
        }
    }
}

/// One input within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Builders for test fixtures; real definitions always come from the store
#[cfg(test)]
impl FieldDefinition {
    /// Create a field with no placeholder or options
    pub fn new(label: &str, field_type: FieldType, required: bool, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.to_string(),
            field_type,
            placeholder: None,
            options: Vec::new(),
            required,
            sort_order,
        }
    }

    /// Builder-style option list
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    /// Builder-style placeholder
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

/// Value entered for one field in a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Set(BTreeSet<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Set(set) => set.is_empty(),
        }
    }

    /// Text content, or `None` for set values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Set(_) => None,
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == option,
            FieldValue::Set(set) => set.contains(option),
        }
    }
}
