use config_cluster_operator::domain::entities::{
    BrokerStatus, ClusterSpec, CoordinationStatus, DatabaseStatus, DependencyRefs, Member,
    WorkloadReplicas,
};

pub const NAMESPACE: &str = "default";
pub const CLUSTER: &str = "config1";

/// Test data fixtures for consistent test data
pub struct TestFixtures;

impl TestFixtures {
    pub fn dependency_refs() -> DependencyRefs {
        DependencyRefs {
            cassandra_instance: "cassandra1".to_string(),
            zookeeper_instance: "zookeeper1".to_string(),
            rabbitmq_instance: "rabbitmq1".to_string(),
            keystone_instance: "keystone".to_string(),
            keystone_secret_name: None,
        }
    }

    pub fn cluster_spec() -> ClusterSpec {
        ClusterSpec {
            dependencies: Self::dependency_refs(),
            ..Default::default()
        }
    }

    /// Three ready members, deliberately not in address order
    pub fn members() -> Vec<Member> {
        vec![
            Member::new("config1-config-statefulset-2", "10.0.0.3").with_container("api", true),
            Member::new("config1-config-statefulset-0", "10.0.0.1")
                .with_hostname("node-a")
                .with_container("api", true),
            Member::new("config1-config-statefulset-1", "10.0.0.2").with_container("api", true),
        ]
    }

    pub fn database() -> DatabaseStatus {
        DatabaseStatus::from_nodes([
            ("cassandra1-cassandra-statefulset-1", "10.1.0.2"),
            ("cassandra1-cassandra-statefulset-0", "10.1.0.1"),
        ])
    }

    pub fn coordination() -> CoordinationStatus {
        CoordinationStatus::from_nodes([("zookeeper1-zookeeper-statefulset-0", "10.2.0.1")])
    }

    pub fn broker() -> BrokerStatus {
        BrokerStatus::from_nodes([("rabbitmq1-rabbitmq-statefulset-0", "10.3.0.1")])
    }

    pub fn replicas(declared: i32, ready: i32) -> WorkloadReplicas {
        WorkloadReplicas {
            declared: Some(declared),
            ready,
        }
    }
}
