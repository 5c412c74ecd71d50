//! Object-store access for the config cluster reconciler
//!
//! Every read and write a reconciliation pass performs goes through one of
//! these traits, so the pass itself never talks to a platform client.

use async_trait::async_trait;

use crate::domain::entities::{
    ArtifactSet, BrokerStatus, ClusterSpec, ClusterStatus, CoordinationStatus, DatabaseStatus,
    IdentityProvider, Member, Secret, WorkloadReplicas,
};
use crate::storage::StoreResult;

/// Reads config cluster specifications
#[async_trait]
pub trait ClusterSpecRepository: Send + Sync {
    /// Find a cluster specification by name
    async fn get_cluster(&self, namespace: &str, name: &str) -> StoreResult<ClusterSpec>;
}

/// Reads the status objects of the dependent clusters
#[async_trait]
pub trait TierRepository: Send + Sync {
    async fn get_database(&self, namespace: &str, name: &str) -> StoreResult<DatabaseStatus>;

    async fn get_coordination(&self, namespace: &str, name: &str)
        -> StoreResult<CoordinationStatus>;

    async fn get_broker(&self, namespace: &str, name: &str) -> StoreResult<BrokerStatus>;

    async fn get_identity_provider(
        &self,
        namespace: &str,
        name: &str,
    ) -> StoreResult<IdentityProvider>;
}

/// Reads secret objects
#[async_trait]
pub trait SecretRepository: Send + Sync {
    async fn get_secret(&self, namespace: &str, name: &str) -> StoreResult<Secret>;
}

/// Reads and marks the live members of a config cluster
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List the cluster's members in whatever order the platform returns them
    async fn list_members(&self, namespace: &str, cluster: &str) -> StoreResult<Vec<Member>>;

    /// Declared and ready replica counts of the cluster workload
    async fn get_workload_replicas(
        &self,
        namespace: &str,
        cluster: &str,
    ) -> StoreResult<WorkloadReplicas>;

    /// Set or clear the peer-ready marker on a member's own metadata
    async fn set_peer_ready(&self, namespace: &str, member: &str, ready: bool) -> StoreResult<()>;
}

/// Persists reconciliation output
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Replace the named artifact bundle as a whole. Implementations must
    /// never leave a partially written bundle behind.
    async fn replace_artifacts(
        &self,
        namespace: &str,
        bundle: &str,
        artifacts: &ArtifactSet,
    ) -> StoreResult<()>;

    async fn update_status(
        &self,
        namespace: &str,
        cluster: &str,
        status: &ClusterStatus,
    ) -> StoreResult<()>;

    /// Last published status, `None` if the cluster was never reconciled
    async fn get_status(&self, namespace: &str, cluster: &str) -> StoreResult<Option<ClusterStatus>>;
}
