//! Registry snapshots used across tests

use eureka_discovery::{Application, Applications, Instance, InstanceStatus};

/// "orders" with one prod instance on 10.0.0.5:8080
pub fn orders_snapshot() -> Applications {
    vec![Application::new("ORDERS").with_instance(
        Instance::new("orders-1.internal", "10.0.0.5")
            .with_port(8080)
            .with_metadata("env", "prod"),
    )]
    .into()
}

/// Two applications sharing the address 10.0.0.9, plus unrelated traffic
pub fn colocated_snapshot() -> Applications {
    vec![
        Application::new("ORDERS")
            .with_instance(Instance::new("orders-1.internal", "10.0.0.5").with_port(8080))
            .with_instance(Instance::new("node-9.internal", "10.0.0.9").with_port(8081)),
        Application::new("BILLING")
            .with_instance(Instance::new("node-9.internal", "10.0.0.9").with_port(9090))
            .with_instance(Instance::new("billing-2.internal", "10.0.0.19").with_port(9090)),
    ]
    .into()
}

/// A larger snapshot mixing ports, labels and statuses
pub fn mixed_snapshot() -> Applications {
    vec![
        Application::new("ORDERS")
            .with_instance(
                Instance::new("orders-1.internal", "10.0.0.5")
                    .with_port(8080)
                    .with_secure_port(8443)
                    .with_metadata("env", "prod")
                    .with_metadata("zone", "a"),
            )
            .with_instance(
                Instance::new("orders-2.internal", "10.0.0.6")
                    .with_port(8080)
                    .with_metadata("env", "staging"),
            )
            .with_instance(
                Instance::new("orders-3.internal", "10.0.0.7")
                    .with_port(8080)
                    .with_metadata("env", "prod")
                    .with_status(InstanceStatus::Starting),
            ),
        Application::new("BILLING").with_instance(
            Instance::new("billing-1.internal", "10.0.0.8")
                .with_port(8080)
                .with_metadata("env", "prod"),
        ),
        Application::new("orders").with_instance(
            Instance::new("orders-4.internal", "10.0.0.10")
                .with_port(9090)
                .with_metadata("env", "prod"),
        ),
        Application::new("INVENTORY"),
    ]
    .into()
}
