//! In-memory registry client

use super::RegistryClient;
use crate::{
    error::{Error, Result},
    models::Applications,
};
use async_trait::async_trait;
use futures::lock::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves a snapshot held in memory, or a configured failure
pub struct MemoryRegistryClient {
    /// Current snapshot, or the reason the registry is unavailable
    state: Mutex<std::result::Result<Applications, String>>,
    /// Number of fetches served
    fetches: AtomicUsize,
}

impl MemoryRegistryClient {
    /// Create a client serving an empty snapshot
    pub fn new() -> Self {
        Self::with_applications(Applications::default())
    }

    /// Create a client serving the given snapshot
    pub fn with_applications(apps: impl Into<Applications>) -> Self {
        Self {
            state: Mutex::new(Ok(apps.into())),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a client whose fetches fail
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(Err(reason.into())),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replace the snapshot
    pub async fn set_applications(&self, apps: impl Into<Applications>) {
        *self.state.lock().await = Ok(apps.into());
    }

    /// Make subsequent fetches fail
    pub async fn set_unavailable(&self, reason: impl Into<String>) {
        *self.state.lock().await = Err(reason.into());
    }

    /// Number of fetches served so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for MemoryRegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryClient for MemoryRegistryClient {
    async fn applications(&self) -> Result<Applications> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock().await;
        match &*state {
            Ok(apps) => Ok(apps.clone()),
            Err(reason) => Err(Error::Unavailable(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Application;

    #[smol_potat::test]
    async fn test_snapshot_replacement() {
        let client = MemoryRegistryClient::new();
        assert!(client.applications().await.unwrap().is_empty());

        client
            .set_applications(vec![Application::new("ORDERS")])
            .await;
        assert_eq!(client.applications().await.unwrap().len(), 1);

        client.set_unavailable("connection refused").await;
        let err = client.applications().await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(ref r) if r == "connection refused"));

        assert_eq!(client.fetch_count(), 3);
    }
}
