//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default REST backend serving `/products` and `/orders`
pub const DEFAULT_BACKEND_URL: &str = "https://68f9797cef8b2e621e7c2bea.mockapi.io/api/v1";

/// Default image upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:3000/api/upload";

const DEFAULT_STALE_AFTER_SECS: u64 = 300;

pub const BACKEND_URL_ENV: &str = "WATHETA_BACKEND_URL";
pub const UPLOAD_URL_ENV: &str = "WATHETA_UPLOAD_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TuiConfig {
    /// Backend base URL
    pub backend_base_url: Option<String>,
    /// Image upload endpoint
    pub upload_url: Option<String>,
    /// Refetch a list when entering it with data older than this
    pub stale_after_secs: Option<u64>,
    /// Product sort field
    pub product_sort_field: Option<String>,
    /// Product sort direction
    pub product_sort_direction: Option<String>,
    /// Order sort field
    pub order_sort_field: Option<String>,
    /// Order sort direction
    pub order_sort_direction: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "watheta", "watheta-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)?;
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.backend_base_url = Some(url);
        }
        if let Some(url) = lookup(UPLOAD_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.upload_url = Some(url);
        }
    }

    pub fn backend_base_url(&self) -> &str {
        self.backend_base_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn upload_url(&self) -> &str {
        self.upload_url.as_deref().unwrap_or(DEFAULT_UPLOAD_URL)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs.unwrap_or(DEFAULT_STALE_AFTER_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.backend_base_url.is_none());
        assert!(config.product_sort_field.is_none());
        assert!(config.order_sort_direction.is_none());
        assert_eq!(config.backend_base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(config.upload_url(), DEFAULT_UPLOAD_URL);
        assert_eq!(config.stale_after(), Duration::from_secs(300));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            backend_base_url: Some("http://localhost:8080/api".to_string()),
            upload_url: None,
            stale_after_secs: Some(60),
            product_sort_field: Some("price".to_string()),
            product_sort_direction: Some("asc".to_string()),
            order_sort_field: Some("client".to_string()),
            order_sort_direction: Some("desc".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.stale_after(), Duration::from_secs(60));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"product_sort_field": "stock", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.product_sort_field, Some("stock".to_string()));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (BACKEND_URL_ENV, "http://127.0.0.1:9000/v1"),
            (UPLOAD_URL_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = TuiConfig {
            backend_base_url: Some("http://file/v1".to_string()),
            upload_url: Some("http://file/upload".to_string()),
            ..Default::default()
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend_base_url(), "http://127.0.0.1:9000/v1");
        assert_eq!(config.upload_url(), "http://file/upload");
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = TuiConfig::config_path();
    }
}
