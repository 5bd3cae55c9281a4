// Site configuration

use crate::store::CollectionPath;
use thiserror::Error;

pub const DEFAULT_APP_ID: &str = "default-app-id";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing value: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// Connection settings for the hosted document store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
    // No timeout unless configured
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub app_id: String,
    pub store: StoreConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reads `LODGING_APP_ID`, `LODGING_STORE_URL`, `LODGING_STORE_API_KEY` and
    /// `LODGING_STORE_TIMEOUT_MS`, falling back to the defaults for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_ms = match lookup("LODGING_STORE_TIMEOUT_MS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                field: "LODGING_STORE_TIMEOUT_MS",
                reason: e.to_string(),
            })?),
            None => defaults.store.timeout_ms,
        };

        let config = Self {
            app_id: lookup("LODGING_APP_ID").unwrap_or(defaults.app_id),
            store: StoreConfig {
                base_url: lookup("LODGING_STORE_URL").unwrap_or(defaults.store.base_url),
                api_key: lookup("LODGING_STORE_API_KEY").unwrap_or(defaults.store.api_key),
                timeout_ms,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::Missing("app_id"));
        }
        if self.app_id.contains('/') {
            return Err(ConfigError::Invalid {
                field: "app_id",
                reason: "must not contain '/'".to_string(),
            });
        }
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("store.base_url"));
        }
        if !self.store.base_url.starts_with("http://") && !self.store.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                field: "store.base_url",
                reason: format!("expected an http(s) URL, got {}", self.store.base_url),
            });
        }
        if self.store.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "store.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    // Where this site's bookings are written
    pub fn collection_path(&self) -> CollectionPath {
        CollectionPath::bookings(&self.app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(
            config.collection_path().as_str(),
            "artifacts/default-app-id/public/data/bookings"
        );
        assert_eq!(config.store.timeout_ms, None);
    }

    #[test]
    fn test_overrides() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("LODGING_APP_ID", "green-coffee"),
            ("LODGING_STORE_URL", "https://store.example.com/v1"),
            ("LODGING_STORE_API_KEY", "secret"),
            ("LODGING_STORE_TIMEOUT_MS", " 2500 "),
        ]))
        .unwrap();

        assert_eq!(config.app_id, "green-coffee");
        assert_eq!(config.store.base_url, "https://store.example.com/v1");
        assert_eq!(config.store.api_key, "secret");
        assert_eq!(config.store.timeout_ms, Some(2500));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("LODGING_STORE_TIMEOUT_MS", "soon")])),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("LODGING_STORE_TIMEOUT_MS", "0")])),
            Err(ConfigError::Invalid { .. })
        ));
        assert_eq!(
            SiteConfig::from_lookup(lookup_from(&[("LODGING_APP_ID", "  ")])),
            Err(ConfigError::Missing("app_id"))
        );
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("LODGING_STORE_URL", "ftp://x")])),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
