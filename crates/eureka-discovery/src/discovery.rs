//! Service discovery over registry snapshots

use crate::{
    client::RegistryClient,
    conversion::{convert_service_instances, convert_services},
    models::Applications,
};
use async_trait::async_trait;
use discovery_model::{
    Error, Hostname, LabelsCollection, PortList, ProbeList, Proxy, Result, Service,
    ServiceAttributes, ServiceDiscovery, ServiceInstance,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// [`ServiceDiscovery`] backed by a registry client.
///
/// Holds nothing but the client: every query fetches a fresh snapshot and
/// converts it, so two queries may see different registry contents.
#[derive(Clone)]
pub struct EurekaServiceDiscovery {
    client: Arc<dyn RegistryClient>,
}

impl EurekaServiceDiscovery {
    /// Create a discovery over a client
    pub fn new(client: impl RegistryClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a discovery over a shared client
    pub fn with_client(client: Arc<dyn RegistryClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self) -> Result<Applications> {
        self.client.applications().await.map_err(|err| {
            warn!("Could not list registry applications: {}", err);
            Error::from(err)
        })
    }
}

#[async_trait]
impl ServiceDiscovery for EurekaServiceDiscovery {
    async fn services(&self) -> Result<Vec<Arc<Service>>> {
        let apps = self.fetch().await?;
        Ok(convert_services(&apps, None).into_values().collect())
    }

    async fn get_service(&self, hostname: &Hostname) -> Result<Option<Arc<Service>>> {
        let apps = self.fetch().await?;
        let filter = HashSet::from([hostname.clone()]);
        let mut services = convert_services(&apps, Some(&filter));
        Ok(services.remove(hostname))
    }

    async fn get_service_attributes(
        &self,
        hostname: &Hostname,
    ) -> Result<Option<ServiceAttributes>> {
        let service = self.get_service(hostname).await?;
        Ok(service.map(|_| ServiceAttributes::for_hostname(hostname)))
    }

    async fn instances(
        &self,
        _hostname: &Hostname,
        _ports: &[String],
        _labels: &LabelsCollection,
    ) -> Result<Vec<ServiceInstance>> {
        Err(Error::NotImplemented("instances by port names"))
    }

    async fn instances_by_port(
        &self,
        hostname: &Hostname,
        port: u16,
        labels: &LabelsCollection,
    ) -> Result<Vec<ServiceInstance>> {
        let apps = self.fetch().await?;
        let filter = HashSet::from([hostname.clone()]);
        let services = convert_services(&apps, Some(&filter));

        let out: Vec<ServiceInstance> = convert_service_instances(&services, &apps)
            .into_iter()
            .filter(|instance| labels.has_subset_of(&instance.labels))
            .filter(|instance| port == 0 || instance.endpoint.port == port)
            .collect();

        debug!("Found {} instances of {} on port {}", out.len(), hostname, port);
        Ok(out)
    }

    async fn get_proxy_service_instances(&self, proxy: &Proxy) -> Result<Vec<ServiceInstance>> {
        let apps = self.fetch().await?;
        let services = convert_services(&apps, None);

        Ok(convert_service_instances(&services, &apps)
            .into_iter()
            .filter(|instance| instance.endpoint.address == proxy.ip_address)
            .collect())
    }

    /// The registry does not manage workloads, so it knows no management ports
    fn management_ports(&self, _addr: &str) -> PortList {
        PortList::new()
    }

    /// The registry does not manage workloads, so it knows no health checks
    fn workload_health_check_info(&self, _addr: &str) -> ProbeList {
        ProbeList::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryRegistryClient;
    use crate::models::{Application, Instance};
    use discovery_model::Labels;

    fn discovery() -> EurekaServiceDiscovery {
        EurekaServiceDiscovery::new(MemoryRegistryClient::with_applications(vec![
            Application::new("ORDERS").with_instance(
                Instance::new("orders-1", "10.0.0.5")
                    .with_port(8080)
                    .with_metadata("env", "prod"),
            ),
        ]))
    }

    #[smol_potat::test]
    async fn test_get_service_attributes() {
        let discovery = discovery();

        let attrs = discovery
            .get_service_attributes(&Hostname::from("orders"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(attrs.name, "orders");
        assert_eq!(attrs.namespace, "default");

        assert!(discovery
            .get_service_attributes(&Hostname::from("billing"))
            .await
            .unwrap()
            .is_none());
    }

    #[smol_potat::test]
    async fn test_instances_not_implemented() {
        let err = discovery()
            .instances(
                &Hostname::from("orders"),
                &["8080".to_string()],
                &LabelsCollection::new(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[smol_potat::test]
    async fn test_instances_by_port_label_query() {
        let discovery = discovery();
        let orders = Hostname::from("orders");

        let prod = LabelsCollection::from(Labels::new().with("env", "prod"));
        assert_eq!(discovery.instances_by_port(&orders, 0, &prod).await.unwrap().len(), 1);

        let staging = LabelsCollection::from(Labels::new().with("env", "staging"));
        assert!(discovery.instances_by_port(&orders, 0, &staging).await.unwrap().is_empty());
    }

    #[test]
    fn test_no_management_info() {
        let discovery = discovery();
        assert!(discovery.management_ports("10.0.0.5").is_empty());
        assert!(discovery.workload_health_check_info("not an address").is_empty());
    }
}
