//! Conversion of registry snapshots into canonical services and instances

use crate::models::{Applications, Instance};
use discovery_model::{
    Hostname, Labels, NetworkEndpoint, Port, Protocol, Service, ServiceInstance,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Metadata key naming the protocol of an instance's ports
pub const PROTOCOL_METADATA: &str = "istio.protocol";

/// Services of one snapshot, keyed by hostname
pub type Catalog = BTreeMap<Hostname, Arc<Service>>;

/// Hostname an application is published under
pub fn convert_hostname(app_name: &str) -> Hostname {
    Hostname::new(app_name.to_ascii_lowercase())
}

/// Build the service catalog of a snapshot.
///
/// With `hostnames` set, only those services are built. Ports come from
/// `UP` instances and are deduplicated by name, first one wins.
pub fn convert_services(apps: &Applications, hostnames: Option<&HashSet<Hostname>>) -> Catalog {
    let mut services: BTreeMap<Hostname, Service> = BTreeMap::new();

    for app in apps.iter() {
        let hostname = convert_hostname(&app.name);
        if hostnames.is_some_and(|filter| !filter.contains(&hostname)) {
            continue;
        }

        let service = services
            .entry(hostname.clone())
            .or_insert_with(|| Service::new(hostname));

        for instance in app.instances.iter().filter(|i| i.is_up()) {
            for port in convert_ports(instance) {
                if let Some(existing) = service.ports.get(&port.name) {
                    if existing.protocol != port.protocol {
                        warn!(
                            "Service {} port {} declared as both {} and {}, keeping {}",
                            service.hostname,
                            port.name,
                            existing.protocol,
                            port.protocol,
                            existing.protocol
                        );
                    }
                    continue;
                }
                service.ports.push(port);
            }
        }
    }

    debug!("Converted {} applications into {} services", apps.len(), services.len());

    services
        .into_iter()
        .map(|(hostname, service)| (hostname, Arc::new(service)))
        .collect()
}

/// Bind the `UP` instances of a snapshot to their services.
///
/// Applications without a service in `services` are skipped, so a catalog
/// filtered by hostname limits the work to that hostname. One instance is
/// produced per enabled port.
pub fn convert_service_instances(services: &Catalog, apps: &Applications) -> Vec<ServiceInstance> {
    let mut out = Vec::new();

    for app in apps.iter() {
        let Some(service) = services.get(&convert_hostname(&app.name)) else {
            continue;
        };

        for instance in app.instances.iter().filter(|i| i.is_up()) {
            let labels = convert_labels(&instance.metadata);
            for port in convert_ports(instance) {
                let service_port = service.ports.get(&port.name).cloned().unwrap_or(port);
                out.push(ServiceInstance {
                    endpoint: NetworkEndpoint {
                        address: instance.ip_addr.clone(),
                        port: service_port.port,
                        service_port,
                    },
                    service: Arc::clone(service),
                    labels: labels.clone(),
                });
            }
        }
    }

    out
}

/// Enabled ports of an instance, plain port first.
///
/// A secure port sharing the plain port's number is the same endpoint and
/// is listed once.
pub fn convert_ports(instance: &Instance) -> Vec<Port> {
    let protocol = convert_protocol(&instance.metadata);
    let mut out: Vec<Port> = Vec::with_capacity(2);

    for declared in [instance.port, instance.secure_port].into_iter().flatten() {
        if !declared.enabled || out.iter().any(|p| p.port == declared.port) {
            continue;
        }
        out.push(Port::new(declared.port.to_string(), declared.port, protocol));
    }

    out
}

/// Protocol named in instance metadata, TCP when absent or unrecognised
pub fn convert_protocol(metadata: &HashMap<String, String>) -> Protocol {
    let Some(name) = metadata.get(PROTOCOL_METADATA) else {
        return Protocol::Tcp;
    };

    match Protocol::parse(name) {
        Protocol::Unsupported => {
            warn!("Unsupported protocol value: {}", name);
            Protocol::Tcp
        }
        protocol => protocol,
    }
}

/// Instance labels: all metadata except the protocol marker
pub fn convert_labels(metadata: &HashMap<String, String>) -> Labels {
    metadata
        .iter()
        .filter(|(k, _)| k.as_str() != PROTOCOL_METADATA)
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}
