#![allow(dead_code)]

use std::sync::Arc;

use config_cluster_operator::domain::entities::{ClusterSpec, Member, Secret};
use config_cluster_operator::reconciler::{Reconciler, RendererSettings, Repositories};
use config_cluster_operator::storage::InMemoryObjectStore;

// Test utilities and common setup
pub mod fixtures;

pub use fixtures::*;

/// In-memory world with one config cluster and its dependent tiers
pub struct TestWorld {
    pub store: Arc<InMemoryObjectStore>,
}

impl TestWorld {
    pub async fn new() -> Self {
        Self::with_spec(TestFixtures::cluster_spec()).await
    }

    pub async fn with_spec(spec: ClusterSpec) -> Self {
        let store = Arc::new(InMemoryObjectStore::new());
        store.put_cluster(NAMESPACE, CLUSTER, spec).await;
        store
            .put_database(NAMESPACE, "cassandra1", TestFixtures::database())
            .await;
        store
            .put_coordination(NAMESPACE, "zookeeper1", TestFixtures::coordination())
            .await;
        store
            .put_broker(NAMESPACE, "rabbitmq1", TestFixtures::broker())
            .await;
        store
            .put_members(NAMESPACE, CLUSTER, TestFixtures::members())
            .await;
        store
            .put_replicas(NAMESPACE, CLUSTER, TestFixtures::replicas(3, 3))
            .await;
        Self { store }
    }

    pub async fn set_members(&self, members: Vec<Member>) {
        self.store.put_members(NAMESPACE, CLUSTER, members).await;
    }

    pub async fn set_replicas(&self, declared: i32, ready: i32) {
        self.store
            .put_replicas(NAMESPACE, CLUSTER, TestFixtures::replicas(declared, ready))
            .await;
    }

    pub async fn put_secret(&self, name: &str, pairs: &[(&str, &str)]) {
        self.store
            .put_secret(NAMESPACE, name, Secret::from_pairs(pairs.iter().copied()))
            .await;
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(
            Repositories::from_store(self.store.clone()),
            RendererSettings::default(),
        )
    }
}
