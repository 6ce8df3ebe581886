//! Label-keyed response records and the submission sent to the store

use super::field::{FieldDefinition, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// Response record keyed by field label
pub type ResponseRecord = Map<String, Value>;

/// A completed registration, ready to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub form_id: Uuid,
    pub program_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub responses: ResponseRecord,
}

/// Remap a draft keyed by field id into a record keyed by field label.
///
/// Every field contributes a key. Fields without a value (including an
/// empty checkbox group) are stored as `""`. Sets become sorted arrays.
/// A later field overwrites an earlier one carrying the same label.
pub fn build_response_record(
    fields: &[FieldDefinition],
    draft: &HashMap<Uuid, FieldValue>,
) -> ResponseRecord {
    let mut record = Map::new();
    for field in fields {
        let value = match draft.get(&field.id) {
            Some(FieldValue::Text(text)) => Value::String(text.clone()),
            Some(FieldValue::Set(set)) if !set.is_empty() => {
                Value::Array(set.iter().cloned().map(Value::String).collect())
            }
            _ => Value::String(String::new()),
        };
        record.insert(field.label.clone(), value);
    }
    record
}
