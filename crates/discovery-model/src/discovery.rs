//! Query interface implemented by every service registry

use crate::{
    error::Result,
    labels::LabelsCollection,
    models::{Hostname, PortList, ProbeList, Proxy, Service, ServiceAttributes, ServiceInstance},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Service catalog queries consumed by the control plane
#[async_trait]
pub trait ServiceDiscovery: Send + Sync {
    /// List all services
    async fn services(&self) -> Result<Vec<Arc<Service>>>;

    /// Get a service by hostname.
    ///
    /// A hostname the registry does not know yields `Ok(None)`.
    async fn get_service(&self, hostname: &Hostname) -> Result<Option<Arc<Service>>>;

    /// Get the attributes of a service, if it exists
    async fn get_service_attributes(&self, hostname: &Hostname)
    -> Result<Option<ServiceAttributes>>;

    /// Instances of a service restricted to named ports and labels
    async fn instances(
        &self,
        hostname: &Hostname,
        ports: &[String],
        labels: &LabelsCollection,
    ) -> Result<Vec<ServiceInstance>>;

    /// Instances of a service on a port (0 matches any port) whose labels
    /// satisfy the query
    async fn instances_by_port(
        &self,
        hostname: &Hostname,
        port: u16,
        labels: &LabelsCollection,
    ) -> Result<Vec<ServiceInstance>>;

    /// Instances colocated with a proxy
    async fn get_proxy_service_instances(&self, proxy: &Proxy) -> Result<Vec<ServiceInstance>>;

    /// Management ports of the workload at `addr`
    fn management_ports(&self, addr: &str) -> PortList;

    /// Health check probes of the workload at `addr`
    fn workload_health_check_info(&self, addr: &str) -> ProbeList;
}
