//! Site-wide settings lookup with per-call defaults

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One `key -> value` row from the settings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetting {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

pub const SITE_NAME: &str = "site_name";
pub const SUBMIT_LABEL: &str = "registration_submit_label";
pub const CLOSE_LABEL: &str = "registration_close_label";

/// Resolved settings shared by every view
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    values: HashMap<String, String>,
}

impl SiteSettings {
    pub fn from_rows(rows: Vec<SiteSetting>) -> Self {
        let values = rows
            .into_iter()
            .filter_map(|row| row.value.map(|value| (row.key, value)))
            .collect();
        Self { values }
    }

    /// Stored value when present and non-empty, otherwise `default`
    pub fn get_or(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => default.to_string(),
        }
    }

    pub fn site_name(&self) -> String {
        self.get_or(SITE_NAME, "Wellness Center")
    }

    pub fn submit_label(&self) -> String {
        self.get_or(SUBMIT_LABEL, "Submit")
    }

    pub fn close_label(&self) -> String {
        self.get_or(CLOSE_LABEL, "Close")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, value: Option<&str>) -> SiteSetting {
        SiteSetting {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_settings_fall_back() {
        let settings = SiteSettings::default();
        assert_eq!(settings.site_name(), "Wellness Center");
        assert_eq!(settings.submit_label(), "Submit");
        assert_eq!(settings.close_label(), "Close");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_stored_value_wins() {
        let settings = SiteSettings::from_rows(vec![row(SITE_NAME, Some("Lotus House"))]);
        assert_eq!(settings.site_name(), "Lotus House");
        assert_eq!(settings.get_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_null_and_empty_values_use_default() {
        let settings = SiteSettings::from_rows(vec![
            row(SUBMIT_LABEL, None),
            row(CLOSE_LABEL, Some("")),
        ]);
        assert_eq!(settings.submit_label(), "Submit");
        assert_eq!(settings.close_label(), "Close");
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_row_deserializes() {
        let rows: Vec<SiteSetting> =
            serde_json::from_str(r#"[{"key": "site_name", "value": "Lotus"}]"#).unwrap();
        assert_eq!(rows, vec![row(SITE_NAME, Some("Lotus"))]);
    }
}
