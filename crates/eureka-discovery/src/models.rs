//! Wire models of the Eureka REST API
//!
//! The registry serializes through Jersey, which has a few quirks handled
//! here: single-element lists may arrive as a bare object, port numbers and
//! flags may be strings, and metadata carries `@`-prefixed type markers.

use crate::error::Result;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of every application known to the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applications {
    /// Registered applications
    #[serde(rename = "application", default, deserialize_with = "one_or_many")]
    pub applications: Vec<Application>,
}

/// Top-level document returned by the applications endpoint
#[derive(Debug, Deserialize)]
struct ApplicationsDocument {
    #[serde(default)]
    applications: Applications,
}

impl Applications {
    /// Decode the JSON body of the applications endpoint
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let document: ApplicationsDocument = serde_json::from_slice(body)?;
        Ok(document.applications)
    }

    /// Iterate over the applications
    pub fn iter(&self) -> std::slice::Iter<'_, Application> {
        self.applications.iter()
    }

    /// Number of applications
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl From<Vec<Application>> for Applications {
    fn from(applications: Vec<Application>) -> Self {
        Self { applications }
    }
}

/// A named group of instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Application name, usually upper-case
    pub name: String,

    /// Registered instances
    #[serde(rename = "instance", default, deserialize_with = "one_or_many")]
    pub instances: Vec<Instance>,
}

impl Application {
    /// Create an application with no instances
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instances: Vec::new(),
        }
    }

    /// Add an instance
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }
}

/// One registered instance of an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Host name the instance registered with
    #[serde(default)]
    pub host_name: String,

    /// IP address of the instance
    #[serde(default)]
    pub ip_addr: String,

    /// Registration status
    #[serde(default)]
    pub status: InstanceStatus,

    /// Plain port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<InstancePort>,

    /// TLS port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_port: Option<InstancePort>,

    /// Free-form metadata
    #[serde(default, deserialize_with = "metadata")]
    pub metadata: HashMap<String, String>,
}

impl Instance {
    /// Create an `UP` instance with no ports or metadata
    pub fn new(host_name: impl Into<String>, ip_addr: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            ip_addr: ip_addr.into(),
            status: InstanceStatus::Up,
            port: None,
            secure_port: None,
            metadata: HashMap::new(),
        }
    }

    /// Enable the plain port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(InstancePort::enabled(port));
        self
    }

    /// Enable the secure port
    pub fn with_secure_port(mut self, port: u16) -> Self {
        self.secure_port = Some(InstancePort::enabled(port));
        self
    }

    /// Set the registration status
    pub fn with_status(mut self, status: InstanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the instance is accepting traffic
    pub fn is_up(&self) -> bool {
        self.status == InstanceStatus::Up
    }
}

/// Registration status of an instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// Ready to receive traffic
    Up,
    /// Failed its health check
    Down,
    /// Still initializing
    Starting,
    /// Taken out of rotation by an operator
    OutOfService,
    /// Status not known
    #[default]
    #[serde(other)]
    Unknown,
}

/// A port declaration with its enabled flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePort {
    /// Port number
    #[serde(rename = "$", deserialize_with = "port_number")]
    pub port: u16,

    /// Whether the port is in use
    #[serde(rename = "@enabled", default, deserialize_with = "flag")]
    pub enabled: bool,
}

impl InstancePort {
    /// An enabled port
    pub fn enabled(port: u16) -> Self {
        Self {
            port,
            enabled: true,
        }
    }

    /// A declared but disabled port
    pub fn disabled(port: u16) -> Self {
        Self {
            port,
            enabled: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn port_number<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom)?,
    };
    u16::try_from(value).map_err(|_| de::Error::custom(format!("port out of range: {value}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!("invalid flag: {other}"))),
        },
    }
}

// Drops Jersey type markers such as "@class"
fn metadata<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.into_iter().filter(|(k, _)| !k.starts_with('@')).collect())
}
