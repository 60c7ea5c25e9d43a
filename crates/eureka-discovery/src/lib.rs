//! Service discovery adapter over a Eureka registry
//!
//! This crate exposes the contents of a Eureka registry through the
//! [`ServiceDiscovery`](discovery_model::ServiceDiscovery) trait. It stores
//! nothing: every query fetches a fresh snapshot through a
//! [`RegistryClient`] and converts it into canonical services and
//! instances.
//!
//! # Architecture
//!
//! - [`client`] fetches snapshots (`HttpRegistryClient` for a live registry,
//!   `MemoryRegistryClient` for tests and embedding)
//! - [`conversion`] turns a snapshot into a catalog and instance list
//! - [`discovery`] runs fetch, convert and filter for each query
//!
//! # Example
//!
//! ```no_run
//! use discovery_model::{Hostname, ServiceDiscovery};
//! use eureka_discovery::{EurekaServiceDiscovery, HttpRegistryClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpRegistryClient::new("http://eureka:8080")?;
//! let discovery = EurekaServiceDiscovery::new(client);
//!
//! if let Some(service) = discovery.get_service(&Hostname::from("orders")).await? {
//!     println!("{} exposes {} ports", service.hostname, service.ports.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod conversion;
pub mod discovery;
pub mod error;
pub mod models;

pub use client::{HttpRegistryClient, MemoryRegistryClient, RegistryClient};
pub use config::{EurekaConfig, RegistryEndpointConfig};
pub use discovery::EurekaServiceDiscovery;
pub use error::{Error, Result};
pub use models::{Application, Applications, Instance, InstancePort, InstanceStatus};

/// Re-export key types for convenience
pub mod prelude {
    pub use crate::{
        Application, Applications, EurekaServiceDiscovery, HttpRegistryClient, Instance,
        MemoryRegistryClient, RegistryClient,
    };
    pub use discovery_model::{
        Hostname, Labels, LabelsCollection, Proxy, Service, ServiceDiscovery, ServiceInstance,
    };
}
