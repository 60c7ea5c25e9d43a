//! Discovery over alternate registry clients

use async_trait::async_trait;
use discovery_model::{Error as DiscoveryError, Hostname, LabelsCollection, ServiceDiscovery};
use eureka_discovery::{Applications, EurekaServiceDiscovery, Error, RegistryClient, Result};
use futures::lock::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

mod common;
use common::snapshots::*;

/// Replays a fixed sequence of fetch outcomes
struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<Applications>>>,
}

impl ScriptedClient {
    fn new(outcomes: Vec<Result<Applications>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl RegistryClient for ScriptedClient {
    async fn applications(&self) -> Result<Applications> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(Error::Unavailable("script exhausted".to_string())))
    }
}

#[smol_potat::test]
async fn test_snapshots_may_disagree_between_calls() {
    let discovery = EurekaServiceDiscovery::new(ScriptedClient::new(vec![
        Ok(orders_snapshot()),
        Ok(colocated_snapshot()),
        Ok(orders_snapshot()),
    ]));
    let orders = Hostname::from("orders");
    let any = LabelsCollection::new();

    let first = discovery.instances_by_port(&orders, 0, &any).await.unwrap();
    let second = discovery.instances_by_port(&orders, 0, &any).await.unwrap();
    let third = discovery.instances_by_port(&orders, 0, &any).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
    assert_eq!(first, third);
}

#[smol_potat::test]
async fn test_http_status_error_passes_through() {
    let client: Arc<dyn RegistryClient> = Arc::new(ScriptedClient::new(vec![Err(
        Error::Status {
            status: 503,
            url: "http://eureka:8080/eureka/v2/apps".to_string(),
        },
    )]));
    let discovery = EurekaServiceDiscovery::with_client(client);

    let err = discovery.services().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Registry returned HTTP 503 for http://eureka:8080/eureka/v2/apps"
    );
    assert!(matches!(err, DiscoveryError::Registry(_)));

    // A failed fetch is not retried: the next call consumes the next outcome
    let err = discovery.services().await.unwrap_err();
    assert_eq!(err.to_string(), "Registry unavailable: script exhausted");
}

#[smol_potat::test]
async fn test_discovery_as_trait_object() {
    let discovery: Box<dyn ServiceDiscovery> = Box::new(EurekaServiceDiscovery::new(
        ScriptedClient::new(vec![Ok(mixed_snapshot())]),
    ));

    let services = discovery.services().await.unwrap();
    assert_eq!(services.len(), 3);
}
