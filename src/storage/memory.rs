//! In-memory object store
//!
//! Backs every repository trait with plain maps. Used by the snapshot CLI
//! and as the deterministic test double for dependent clusters and secrets.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    ArtifactSet, BrokerStatus, ClusterSpec, ClusterStatus, CoordinationStatus, DatabaseStatus,
    IdentityProvider, Member, Secret, WorkloadReplicas,
};
use crate::domain::repositories::{
    ClusterSpecRepository, MemberRepository, SecretRepository, StatusRepository, TierRepository,
};
use crate::storage::{StoreError, StoreResult};

type ObjectKey = (String, String);

fn key(namespace: &str, name: &str) -> ObjectKey {
    (namespace.to_string(), name.to_string())
}

#[derive(Default)]
pub struct InMemoryObjectStore {
    clusters: RwLock<HashMap<ObjectKey, ClusterSpec>>,
    databases: RwLock<HashMap<ObjectKey, DatabaseStatus>>,
    coordinations: RwLock<HashMap<ObjectKey, CoordinationStatus>>,
    brokers: RwLock<HashMap<ObjectKey, BrokerStatus>>,
    identity_providers: RwLock<HashMap<ObjectKey, IdentityProvider>>,
    secrets: RwLock<HashMap<ObjectKey, Secret>>,
    members: RwLock<HashMap<ObjectKey, Vec<Member>>>,
    replicas: RwLock<HashMap<ObjectKey, WorkloadReplicas>>,
    peer_ready: RwLock<HashMap<ObjectKey, bool>>,
    bundles: RwLock<HashMap<ObjectKey, ArtifactSet>>,
    statuses: RwLock<HashMap<ObjectKey, ClusterStatus>>,
    unavailable: RwLock<HashSet<String>>,
    reject_writes: AtomicBool,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_cluster(&self, namespace: &str, name: &str, spec: ClusterSpec) {
        self.clusters.write().await.insert(key(namespace, name), spec);
    }

    pub async fn put_database(&self, namespace: &str, name: &str, status: DatabaseStatus) {
        self.databases.write().await.insert(key(namespace, name), status);
    }

    pub async fn put_coordination(&self, namespace: &str, name: &str, status: CoordinationStatus) {
        self.coordinations
            .write()
            .await
            .insert(key(namespace, name), status);
    }

    pub async fn put_broker(&self, namespace: &str, name: &str, status: BrokerStatus) {
        self.brokers.write().await.insert(key(namespace, name), status);
    }

    pub async fn put_identity_provider(
        &self,
        namespace: &str,
        name: &str,
        provider: IdentityProvider,
    ) {
        self.identity_providers
            .write()
            .await
            .insert(key(namespace, name), provider);
    }

    pub async fn put_secret(&self, namespace: &str, name: &str, secret: Secret) {
        self.secrets.write().await.insert(key(namespace, name), secret);
    }

    /// Members are returned by `list_members` in exactly this order
    pub async fn put_members(&self, namespace: &str, cluster: &str, members: Vec<Member>) {
        self.members
            .write()
            .await
            .insert(key(namespace, cluster), members);
    }

    pub async fn put_replicas(&self, namespace: &str, cluster: &str, replicas: WorkloadReplicas) {
        self.replicas
            .write()
            .await
            .insert(key(namespace, cluster), replicas);
    }

    pub async fn put_artifacts(&self, namespace: &str, bundle: &str, artifacts: ArtifactSet) {
        self.bundles
            .write()
            .await
            .insert(key(namespace, bundle), artifacts);
    }

    /// Make every read of objects with this name fail
    pub async fn mark_unavailable(&self, name: &str) {
        self.unavailable.write().await.insert(name.to_string());
    }

    pub async fn mark_available(&self, name: &str) {
        self.unavailable.write().await.remove(name);
    }

    /// Make every write fail until switched back
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub async fn artifacts(&self, namespace: &str, bundle: &str) -> Option<ArtifactSet> {
        self.bundles.read().await.get(&key(namespace, bundle)).cloned()
    }

    pub async fn peer_ready(&self, namespace: &str, member: &str) -> Option<bool> {
        self.peer_ready
            .read()
            .await
            .get(&key(namespace, member))
            .copied()
    }

    async fn check_readable(&self, name: &str) -> StoreResult<()> {
        if self.unavailable.read().await.contains(name) {
            return Err(StoreError::BackendUnavailable(format!(
                "object '{}' cannot be read",
                name
            )));
        }
        Ok(())
    }

    fn check_writable(&self, what: &str) -> StoreResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(what.to_string()));
        }
        Ok(())
    }

    async fn read<T: Clone>(
        &self,
        map: &RwLock<HashMap<ObjectKey, T>>,
        namespace: &str,
        name: &str,
    ) -> StoreResult<T> {
        self.check_readable(name).await?;
        map.read()
            .await
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", namespace, name)))
    }
}

#[async_trait]
impl ClusterSpecRepository for InMemoryObjectStore {
    async fn get_cluster(&self, namespace: &str, name: &str) -> StoreResult<ClusterSpec> {
        self.read(&self.clusters, namespace, name).await
    }
}

#[async_trait]
impl TierRepository for InMemoryObjectStore {
    async fn get_database(&self, namespace: &str, name: &str) -> StoreResult<DatabaseStatus> {
        self.read(&self.databases, namespace, name).await
    }

    async fn get_coordination(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<CoordinationStatus> {
        self.read(&self.coordinations, namespace, name).await
    }

    async fn get_broker(&self, namespace: &str, name: &str) -> StoreResult<BrokerStatus> {
        self.read(&self.brokers, namespace, name).await
    }

    async fn get_identity_provider(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<IdentityProvider> {
        self.read(&self.identity_providers, namespace, name).await
    }
}

#[async_trait]
impl SecretRepository for InMemoryObjectStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> StoreResult<Secret> {
        self.read(&self.secrets, namespace, name).await
    }
}

#[async_trait]
impl MemberRepository for InMemoryObjectStore {
    async fn list_members(&self, namespace: &str, cluster: &str) -> StoreResult<Vec<Member>> {
        self.check_readable(cluster).await?;
        Ok(self
            .members
            .read()
            .await
            .get(&key(namespace, cluster))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_workload_replicas(
        &self,
        namespace: &str,
        cluster: &str,
    ) -> StoreResult<WorkloadReplicas> {
        self.read(&self.replicas, namespace, cluster).await
    }

    async fn set_peer_ready(&self, namespace: &str, member: &str, ready: bool) -> StoreResult<()> {
        self.check_writable(member)?;
        self.peer_ready
            .write()
            .await
            .insert(key(namespace, member), ready);
        Ok(())
    }
}

#[async_trait]
impl StatusRepository for InMemoryObjectStore {
    async fn replace_artifacts(
        &self,
        namespace: &str,
        bundle: &str,
        artifacts: &ArtifactSet,
    ) -> StoreResult<()> {
        self.check_writable(bundle)?;
        // single insert under the write lock: readers see the old or the new set
        self.bundles
            .write()
            .await
            .insert(key(namespace, bundle), artifacts.clone());
        debug!("Replaced bundle {}/{} ({} artifacts)", namespace, bundle, artifacts.len());
        Ok(())
    }

    async fn update_status(
        &self,
        namespace: &str,
        cluster: &str,
        status: &ClusterStatus,
    ) -> StoreResult<()> {
        self.check_writable(cluster)?;
        self.statuses
            .write()
            .await
            .insert(key(namespace, cluster), status.clone());
        Ok(())
    }

    async fn get_status(&self, namespace: &str, cluster: &str) -> StoreResult<Option<ClusterStatus>> {
        self.check_readable(cluster).await?;
        Ok(self.statuses.read().await.get(&key(namespace, cluster)).cloned())
    }
}
