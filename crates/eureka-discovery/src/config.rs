//! Configuration structures for the Eureka adapter

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Eureka adapter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EurekaConfig {
    /// Registry endpoint
    pub registry: RegistryEndpointConfig,
}

/// Where and how to reach the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEndpointConfig {
    /// Base URL (e.g., "http://eureka:8080")
    pub url: String,
    /// Path of the applications listing
    #[serde(default = "default_apps_path")]
    pub apps_path: String,
    /// Per-request transport timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_apps_path() -> String {
    "/eureka/v2/apps".to_string()
}

impl Default for RegistryEndpointConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8080")
    }
}

impl RegistryEndpointConfig {
    /// Endpoint config for a base URL with default path and no timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            apps_path: default_apps_path(),
            request_timeout_secs: None,
        }
    }

    /// Full URL of the applications listing
    pub fn apps_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.apps_path)
    }

    /// Check the endpoint is usable
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::Config("registry url cannot be empty".to_string()));
        }
        if !self.apps_path.starts_with('/') {
            return Err(Error::Config(format!(
                "apps_path must start with '/': {}",
                self.apps_path
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl EurekaConfig {
    /// Configuration pointing at a registry base URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            registry: RegistryEndpointConfig::new(url),
        }
    }

    /// Load configuration from file
    pub async fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = async_fs::read_to_string(path).await?;

        // YAML by extension, JSON otherwise
        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        self.registry.validate()
    }
}
