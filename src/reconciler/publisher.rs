//! Persists the outcome of a pass: artifact bundle, peer-ready markers and
//! cluster status.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{ArtifactSet, ClusterStatus, Member, StatusPorts};
use crate::domain::repositories::{MemberRepository, StatusRepository};
use crate::error::{AppError, Result};
use crate::reconciler::readiness::ReadinessState;
use crate::reconciler::resolver::EffectiveConfig;

/// Label carrying the peer-ready marker on each member
pub const PEER_READY_LABEL: &str = "peers_ready";

pub fn bundle_name(cluster: &str) -> String {
    format!("{}-config-configmap", cluster)
}

/// Status for the given pass output
pub fn build_status(
    config: &EffectiveConfig,
    members: &[Member],
    readiness: &ReadinessState,
) -> ClusterStatus {
    ClusterStatus {
        active: readiness.active,
        nodes: members
            .iter()
            .map(|m| (m.name.clone(), m.ip.clone()))
            .collect(),
        ports: StatusPorts {
            api_port: config.api_port.to_string(),
            analytics_port: config.analytics_port.to_string(),
            collector_port: config.collector_port.to_string(),
            redis_port: config.redis_port.to_string(),
        },
    }
}

pub struct StatusPublisher {
    statuses: Arc<dyn StatusRepository>,
    members: Arc<dyn MemberRepository>,
}

impl StatusPublisher {
    pub fn new(statuses: Arc<dyn StatusRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { statuses, members }
    }

    /// Replace the artifact bundle as a whole
    pub async fn publish_artifacts(
        &self,
        namespace: &str,
        cluster: &str,
        artifacts: &ArtifactSet,
    ) -> Result<()> {
        let bundle = bundle_name(cluster);
        self.statuses
            .replace_artifacts(namespace, &bundle, artifacts)
            .await
            .map_err(|e| AppError::PersistenceFailure(format!("bundle {}: {}", bundle, e)))?;
        info!(
            "📦 Published {} artifacts to {}/{}",
            artifacts.len(),
            namespace,
            bundle
        );
        Ok(())
    }

    /// Write every member's `peers_ready` marker
    pub async fn publish_readiness(&self, namespace: &str, readiness: &ReadinessState) -> Result<()> {
        for (member, ready) in &readiness.peer_ready {
            self.members
                .set_peer_ready(namespace, member, *ready)
                .await
                .map_err(|e| {
                    AppError::PersistenceFailure(format!(
                        "{} marker on {}: {}",
                        PEER_READY_LABEL, member, e
                    ))
                })?;
            if !ready {
                debug!("Member {} waits for its predecessors", member);
            }
        }
        Ok(())
    }

    pub async fn publish_status(
        &self,
        namespace: &str,
        cluster: &str,
        status: &ClusterStatus,
    ) -> Result<()> {
        let previous = self
            .statuses
            .get_status(namespace, cluster)
            .await
            .map_err(|e| {
                warn!("Cannot read previous status of {}/{}: {}", namespace, cluster, e);
                AppError::dependency("status", cluster, e)
            })?;
        if previous.map_or(false, |p| p.active) && !status.active {
            warn!("Cluster {}/{} is no longer active", namespace, cluster);
        }
        self.statuses
            .update_status(namespace, cluster, status)
            .await
            .map_err(|e| AppError::PersistenceFailure(format!("status of {}: {}", cluster, e)))?;
        info!(
            "✅ Status of {}/{}: active={}, {} nodes",
            namespace,
            cluster,
            status.active,
            status.nodes.len()
        );
        Ok(())
    }
}
