//! Bridge configuration: where the API and the views live.
//!
//! Defaults reproduce the fixed paths the pages were written against
//! (`/api/v1`, `/flair/dt`, `/flair/new`) with an empty base URL, so every
//! path is same-origin relative.

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_LIST_VIEW_PREFIX: &str = "/flair/dt";
pub const DEFAULT_NEW_FORM_PREFIX: &str = "/flair/new";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Prepended to API paths only. Empty means same-origin.
    pub base_url: String,
    pub api_prefix: String,
    pub list_view_prefix: String,
    pub new_form_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            list_view_prefix: DEFAULT_LIST_VIEW_PREFIX.to_string(),
            new_form_prefix: DEFAULT_NEW_FORM_PREFIX.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Config pointing the API at `base_url`, everything else default.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `FLAIR_BASE_URL`, `FLAIR_API_PREFIX`, `FLAIR_LIST_VIEW_PREFIX` and
    /// `FLAIR_NEW_FORM_PREFIX`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = lookup("FLAIR_BASE_URL") {
            config.base_url = v;
        }
        if let Some(v) = lookup("FLAIR_API_PREFIX") {
            config.api_prefix = v;
        }
        if let Some(v) = lookup("FLAIR_LIST_VIEW_PREFIX") {
            config.list_view_prefix = v;
        }
        if let Some(v) = lookup("FLAIR_NEW_FORM_PREFIX") {
            config.new_form_prefix = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api_prefix", &self.api_prefix),
            ("list_view_prefix", &self.list_view_prefix),
            ("new_form_prefix", &self.new_form_prefix),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::BadPrefix {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_fixed_paths() {
        let config = BridgeConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.list_view_prefix, "/flair/dt");
        assert_eq!(config.new_form_prefix, "/flair/new");
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = BridgeConfig::from_json(r#"{"base_url":"http://localhost:3000"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.api_prefix, "/api/v1");
    }

    #[test]
    fn from_json_rejects_relative_prefix() {
        let err = BridgeConfig::from_json(r#"{"api_prefix":"api/v2"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BadPrefix { field: "api_prefix", .. }));
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = BridgeConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("FLAIR_BASE_URL", "http://api.internal"),
            ("FLAIR_LIST_VIEW_PREFIX", "/admin/list"),
        ]
        .into_iter()
        .collect();
        let config = BridgeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://api.internal");
        assert_eq!(config.list_view_prefix, "/admin/list");
        assert_eq!(config.new_form_prefix, "/flair/new");
    }
}
