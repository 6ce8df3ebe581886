//! Configuration handling
//!
//! Values come from `config.json` in the platform config directory and can
//! be overridden with `WELLNESS_*` environment variables.

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub const ENV_STORE_URL: &str = "WELLNESS_STORE_URL";
pub const ENV_API_KEY: &str = "WELLNESS_API_KEY";
pub const ENV_FORM_ID: &str = "WELLNESS_FORM_ID";
pub const ENV_PROGRAM_ID: &str = "WELLNESS_PROGRAM_ID";
pub const ENV_COURSE_ID: &str = "WELLNESS_COURSE_ID";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the data store
    pub store_url: Option<String>,
    /// Public API key sent with every request
    pub api_key: Option<String>,
    /// Registration form to open
    pub form_id: Option<String>,
    /// Program the submission is attributed to
    pub program_id: Option<String>,
    /// Course the submission is attributed to
    pub course_id: Option<String>,
}

/// Validated settings needed to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub store_url: String,
    pub api_key: String,
    pub form_id: Uuid,
    pub program_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "wellness", "wellness-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: AppConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Override fields with any non-empty values returned by `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = get(ENV_STORE_URL) {
            self.store_url = Some(v);
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = get(ENV_FORM_ID) {
            self.form_id = Some(v);
        }
        if let Some(v) = get(ENV_PROGRAM_ID) {
            self.program_id = Some(v);
        }
        if let Some(v) = get(ENV_COURSE_ID) {
            self.course_id = Some(v);
        }
    }

    /// Check required values and parse identifiers
    pub fn resolve(&self) -> Result<RuntimeConfig> {
        let store_url = self
            .store_url
            .clone()
            .ok_or_else(|| anyhow!("store URL is not configured (set {ENV_STORE_URL})"))?;
        let form_id = self
            .form_id
            .as_deref()
            .ok_or_else(|| anyhow!("form id is not configured (set {ENV_FORM_ID})"))?;

        Ok(RuntimeConfig {
            store_url,
            api_key: self.api_key.clone().unwrap_or_default(),
            form_id: parse_id("form id", form_id)?,
            program_id: self
                .program_id
                .as_deref()
                .map(|id| parse_id("program id", id))
                .transpose()?,
            course_id: self
                .course_id
                .as_deref()
                .map(|id| parse_id("course id", id))
                .transpose()?,
        })
    }
}

fn parse_id(what: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).with_context(|| format!("invalid {what}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FORM: &str = "0f8c1d7a-2b6b-4c38-8d4e-1f9a2e3b4c5d";

    fn complete() -> AppConfig {
        AppConfig {
            store_url: Some("https://demo.example.co".to_string()),
            api_key: Some("anon".to_string()),
            form_id: Some(FORM.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.store_url.is_none());
        assert!(config.api_key.is_none());
        assert!(config.form_id.is_none());
        assert!(config.program_id.is_none());
        assert!(config.course_id.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            program_id: Some("a1b2c3d4-0000-4000-8000-000000000001".to_string()),
            ..complete()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.store_url, config.store_url);
        assert_eq!(parsed.form_id, config.form_id);
        assert_eq!(parsed.program_id, config.program_id);
        assert!(parsed.course_id.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.store_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"form_id": "abc", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.form_id, Some("abc".to_string()));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = complete();
        let env: HashMap<&str, &str> = [
            (ENV_STORE_URL, "https://other.example.co"),
            (ENV_API_KEY, ""),
            (ENV_COURSE_ID, "c0c0c0c0-0000-4000-8000-000000000002"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_url.as_deref(), Some("https://other.example.co"));
        // Empty variables do not clear file values
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(
            config.course_id.as_deref(),
            Some("c0c0c0c0-0000-4000-8000-000000000002")
        );
    }

    #[test]
    fn test_resolve_complete() {
        let runtime = complete().resolve().unwrap();
        assert_eq!(runtime.form_id.to_string(), FORM);
        assert_eq!(runtime.api_key, "anon");
        assert!(runtime.program_id.is_none());
    }

    #[test]
    fn test_resolve_requires_store_url() {
        let config = AppConfig {
            store_url: None,
            ..complete()
        };
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains(ENV_STORE_URL));
    }

    #[test]
    fn test_resolve_requires_form_id() {
        let config = AppConfig {
            form_id: None,
            ..complete()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_resolve_rejects_bad_uuid() {
        let config = AppConfig {
            program_id: Some("not-a-uuid".to_string()),
            ..complete()
        };
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("invalid program id"));
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = AppConfig::config_path();
    }
}
