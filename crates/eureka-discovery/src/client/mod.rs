//! Registry clients
//!
//! A client fetches one snapshot of the registry per call. It does not
//! poll, cache or retry; those concerns belong to whoever wraps it.

pub mod http;
pub mod memory;

use crate::{error::Result, models::Applications};
use async_trait::async_trait;

pub use http::HttpRegistryClient;
pub use memory::MemoryRegistryClient;

/// Source of registry snapshots
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetch the current set of applications
    async fn applications(&self) -> Result<Applications>;
}
