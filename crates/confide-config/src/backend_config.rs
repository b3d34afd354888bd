use crate::{ConfigError, ConfigErrorResult, DEFAULT_BACKEND_URL};

use serde::Deserialize;

/// Hosted auth + document store endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    /// Public project key sent with every request. Never logged.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_BACKEND_URL),
            api_key: None,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::backend("backend.url cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::backend(format!(
                "backend.url must start with http:// or https://, got '{url}'"
            )));
        }
        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            return Err(ConfigError::backend(
                "backend.api_key cannot be blank when set",
            ));
        }
        Ok(())
    }
}
