//! Data models for canonical services and their instances

use crate::labels::Labels;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Namespace assigned to every service that has no namespace of its own
pub const DEFAULT_NAMESPACE: &str = "default";

/// Canonical identifier of a service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hostname(String);

impl Hostname {
    /// Create a hostname from its string form
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// String form of the hostname
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Hostname {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Hostname {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Application protocol spoken on a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// HTTP/1.1
    Http,
    /// HTTP/2
    Http2,
    /// HTTPS
    Https,
    /// gRPC
    Grpc,
    /// Raw TCP
    Tcp,
    /// Opaque TLS
    Tls,
    /// UDP
    Udp,
    /// MongoDB wire protocol
    Mongo,
    /// Redis wire protocol
    Redis,
    /// MySQL wire protocol
    Mysql,
    /// Anything we do not recognise
    Unsupported,
}

impl Protocol {
    /// Parse a protocol name, case-insensitively.
    ///
    /// Unknown names map to [`Protocol::Unsupported`] rather than failing.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "http" => Self::Http,
            "http2" => Self::Http2,
            "https" => Self::Https,
            "grpc" => Self::Grpc,
            "tcp" => Self::Tcp,
            "tls" => Self::Tls,
            "udp" => Self::Udp,
            "mongo" => Self::Mongo,
            "redis" => Self::Redis,
            "mysql" => Self::Mysql,
            _ => Self::Unsupported,
        }
    }
}

impl FromStr for Protocol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Http => "HTTP",
            Self::Http2 => "HTTP2",
            Self::Https => "HTTPS",
            Self::Grpc => "GRPC",
            Self::Tcp => "TCP",
            Self::Tls => "TLS",
            Self::Udp => "UDP",
            Self::Mongo => "Mongo",
            Self::Redis => "Redis",
            Self::Mysql => "MySQL",
            Self::Unsupported => "UnsupportedProtocol",
        };
        f.write_str(name)
    }
}

/// A named service port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within a service
    pub name: String,
    /// Port number
    pub port: u16,
    /// Protocol spoken on the port
    pub protocol: Protocol,
}

impl Port {
    /// Create a new port
    pub fn new(name: impl Into<String>, port: u16, protocol: Protocol) -> Self {
        Self {
            name: name.into(),
            port,
            protocol,
        }
    }
}

/// Ordered list of ports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortList(Vec<Port>);

impl PortList {
    /// Create an empty port list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Look up a port by name
    pub fn get(&self, name: &str) -> Option<&Port> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Append a port
    pub fn push(&mut self, port: Port) {
        self.0.push(port);
    }

    /// Iterate over the ports
    pub fn iter(&self) -> std::slice::Iter<'_, Port> {
        self.0.iter()
    }

    /// Number of ports
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Port>> for PortList {
    fn from(ports: Vec<Port>) -> Self {
        Self(ports)
    }
}

impl FromIterator<Port> for PortList {
    fn from_iter<I: IntoIterator<Item = Port>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PortList {
    type Item = Port;
    type IntoIter = std::vec::IntoIter<Port>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PortList {
    type Item = &'a Port;
    type IntoIter = std::slice::Iter<'a, Port>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Descriptive attributes of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAttributes {
    /// Short service name
    pub name: String,
    /// Namespace the service belongs to
    pub namespace: String,
}

impl ServiceAttributes {
    /// Attributes for a hostname in the default namespace
    pub fn for_hostname(hostname: &Hostname) -> Self {
        Self {
            name: hostname.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// A canonical service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Catalog key
    pub hostname: Hostname,
    /// Ports exposed by the service
    pub ports: PortList,
    /// Service attributes
    pub attributes: ServiceAttributes,
}

impl Service {
    /// Create a service with no ports in the default namespace
    pub fn new(hostname: Hostname) -> Self {
        let attributes = ServiceAttributes::for_hostname(&hostname);
        Self {
            hostname,
            ports: PortList::new(),
            attributes,
        }
    }
}

/// Network address of one instance of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    /// Instance address, usually an IP
    pub address: String,
    /// Port the instance listens on
    pub port: u16,
    /// Service port this endpoint serves
    pub service_port: Port,
}

/// One instance of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInstance {
    /// Where the instance can be reached
    pub endpoint: NetworkEndpoint,
    /// Owning service
    pub service: Arc<Service>,
    /// Instance labels
    pub labels: Labels,
}

impl ServiceInstance {
    /// Hostname of the owning service
    pub fn hostname(&self) -> &Hostname {
        &self.service.hostname
    }
}

/// A workload asking about its own colocated instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    /// Workload identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// IP address of the workload
    pub ip_address: String,
}

impl Proxy {
    /// Create a proxy for an IP address
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            id: None,
            ip_address: ip_address.into(),
        }
    }

    /// Attach a workload identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Health check probe of a workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// Port the probe targets
    pub port: Port,
    /// HTTP path, empty for TCP probes
    pub path: String,
}

/// List of health check probes
pub type ProbeList = Vec<Probe>;
