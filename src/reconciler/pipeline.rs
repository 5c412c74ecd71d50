//! One reconciliation pass over a config cluster

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::domain::entities::{ArtifactSet, ClusterStatus};
use crate::domain::repositories::{
    ClusterSpecRepository, MemberRepository, SecretRepository, StatusRepository, TierRepository,
};
use crate::error::{AppError, Result};
use crate::reconciler::credentials::CredentialResolver;
use crate::reconciler::publisher::{build_status, StatusPublisher};
use crate::reconciler::readiness::{self, ReadinessState};
use crate::reconciler::renderer::{ArtifactRenderer, RenderRequest, RendererSettings};
use crate::reconciler::resolver;
use crate::reconciler::topology::TopologyAggregator;

/// Handles to every repository a pass reads from or writes to
#[derive(Clone)]
pub struct Repositories {
    pub clusters: Arc<dyn ClusterSpecRepository>,
    pub tiers: Arc<dyn TierRepository>,
    pub secrets: Arc<dyn SecretRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub statuses: Arc<dyn StatusRepository>,
}

impl Repositories {
    /// All five handles backed by the same store
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ClusterSpecRepository
            + TierRepository
            + SecretRepository
            + MemberRepository
            + StatusRepository
            + 'static,
    {
        Self {
            clusters: store.clone(),
            tiers: store.clone(),
            secrets: store.clone(),
            members: store.clone(),
            statuses: store,
        }
    }
}

/// What a completed pass produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub pass_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub artifacts: ArtifactSet,
    pub readiness: ReadinessState,
    pub status: ClusterStatus,
}

/// Sequences resolver, aggregator, credentials, renderer, readiness gate
/// and publisher. Holds no per-cluster state, so passes for different
/// clusters may run concurrently on one instance.
pub struct Reconciler {
    repositories: Repositories,
    aggregator: TopologyAggregator,
    credentials: CredentialResolver,
    renderer: ArtifactRenderer,
    publisher: StatusPublisher,
}

impl Reconciler {
    pub fn new(repositories: Repositories, settings: RendererSettings) -> Self {
        Self {
            aggregator: TopologyAggregator::new(repositories.tiers.clone()),
            credentials: CredentialResolver::new(
                repositories.secrets.clone(),
                repositories.tiers.clone(),
            ),
            renderer: ArtifactRenderer::new(settings),
            publisher: StatusPublisher::new(
                repositories.statuses.clone(),
                repositories.members.clone(),
            ),
            repositories,
        }
    }

    /// Run one pass. Any failure aborts it before or during publication and
    /// is returned unchanged; the caller decides when to retry.
    pub async fn reconcile(&self, namespace: &str, cluster: &str) -> Result<PassOutcome> {
        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "reconcile",
            cluster = %cluster,
            namespace = %namespace,
            pass_id = %pass_id
        );

        let result = self
            .run_pass(pass_id, namespace, cluster)
            .instrument(span.clone())
            .await;
        if let Err(e) = &result {
            span.in_scope(|| error!("❌ Pass aborted: {}", e));
        }
        result
    }

    async fn run_pass(&self, pass_id: Uuid, namespace: &str, cluster: &str) -> Result<PassOutcome> {
        let started_at = Utc::now();
        info!("🚀 Starting reconciliation pass at {}", started_at.to_rfc3339());

        let spec = self
            .repositories
            .clusters
            .get_cluster(namespace, cluster)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::NotFound(format!("config cluster {}/{}", namespace, cluster))
                } else {
                    AppError::dependency("config cluster", cluster, e)
                }
            })?;
        let config = resolver::resolve(&spec);

        let members = self
            .repositories
            .members
            .list_members(namespace, cluster)
            .await
            .map_err(|e| AppError::dependency("members", cluster, e))?;

        let topology = self
            .aggregator
            .aggregate(namespace, &spec.dependencies, &members)
            .await?;
        let credentials = self
            .credentials
            .resolve(
                namespace,
                &config,
                &spec.dependencies,
                topology.broker.secret.as_deref(),
            )
            .await?;

        let artifacts = self.renderer.render(&RenderRequest {
            cluster_name: cluster,
            namespace,
            config: &config,
            topology: &topology,
            credentials: &credentials,
            members: &members,
        })?;

        let replicas = self
            .repositories
            .members
            .get_workload_replicas(namespace, cluster)
            .await
            .map_err(|e| AppError::dependency("workload", cluster, e))?;
        let readiness = readiness::evaluate(&members, &replicas);
        let status = build_status(&config, &members, &readiness);

        self.publisher
            .publish_artifacts(namespace, cluster, &artifacts)
            .await?;
        self.publisher.publish_readiness(namespace, &readiness).await?;
        self.publisher
            .publish_status(namespace, cluster, &status)
            .await?;

        info!(
            "Pass complete in {}ms: {} artifacts, {}/{} members peer-ready, active={}",
            (Utc::now() - started_at).num_milliseconds(),
            artifacts.len(),
            readiness.ready_count(),
            readiness.peer_ready.len(),
            readiness.active
        );
        Ok(PassOutcome {
            pass_id,
            started_at,
            artifacts,
            readiness,
            status,
        })
    }

    /// Whether the last published status marks the cluster active.
    /// A cluster that was never reconciled is not active.
    pub async fn is_active(&self, namespace: &str, cluster: &str) -> Result<bool> {
        let status = self
            .repositories
            .statuses
            .get_status(namespace, cluster)
            .await
            .map_err(|e| AppError::dependency("status", cluster, e))?;
        Ok(status.map(|s| s.active).unwrap_or(false))
    }
}
