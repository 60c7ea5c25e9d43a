//! REST client for the registry's applications endpoint

use super::RegistryClient;
use crate::{
    config::RegistryEndpointConfig,
    error::{Error, Result},
    models::Applications,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// Fetches snapshots with one `GET` of the applications listing
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    http: reqwest::Client,
    apps_url: String,
}

impl HttpRegistryClient {
    /// Client for a registry base URL with default settings
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::from_config(&RegistryEndpointConfig::new(url))
    }

    /// Client built from endpoint configuration
    pub fn from_config(config: &RegistryEndpointConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            apps_url: config.apps_url(),
        })
    }

    /// URL queried for snapshots
    pub fn apps_url(&self) -> &str {
        &self.apps_url
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn applications(&self) -> Result<Applications> {
        debug!("Fetching applications from {}", self.apps_url);

        let response = self
            .http
            .get(&self.apps_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: self.apps_url.clone(),
            });
        }

        let body = response.bytes().await?;
        let apps = Applications::from_json(&body)?;
        debug!("Fetched {} applications", apps.len());
        Ok(apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apps_url_from_config() {
        let client = HttpRegistryClient::new("http://eureka:8761/").unwrap();
        assert_eq!(client.apps_url(), "http://eureka:8761/eureka/v2/apps");

        let mut config = RegistryEndpointConfig::new("http://eureka:8761");
        config.apps_path = "/eureka/apps".to_string();
        config.request_timeout_secs = Some(3);
        let client = HttpRegistryClient::from_config(&config).unwrap();
        assert_eq!(client.apps_url(), "http://eureka:8761/eureka/apps");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            HttpRegistryClient::new(""),
            Err(Error::Config(_))
        ));
    }
}
