//! YAML world snapshots
//!
//! A snapshot describes everything a pass would otherwise read from the
//! platform: cluster specs, tier statuses, secrets, members and replica
//! counts. Loading one yields a populated [`InMemoryObjectStore`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::{
    ArtifactSet, BrokerStatus, ClusterSpec, ClusterStatus, CoordinationStatus, DatabaseStatus,
    IdentityProvider, Member, Secret, WorkloadReplicas,
};
use crate::error::{AppError, Result};
use crate::storage::InMemoryObjectStore;

/// Status file written next to the artifacts
pub const STATUS_FILE: &str = "status.json";

fn default_namespace() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub clusters: BTreeMap<String, ClusterSpec>,
    #[serde(default)]
    pub databases: BTreeMap<String, DatabaseStatus>,
    #[serde(default)]
    pub coordinations: BTreeMap<String, CoordinationStatus>,
    #[serde(default)]
    pub brokers: BTreeMap<String, BrokerStatus>,
    #[serde(default)]
    pub identity_providers: BTreeMap<String, IdentityProvider>,
    #[serde(default)]
    pub secrets: BTreeMap<String, Secret>,
    /// Cluster name to its members, in retrieval order
    #[serde(default)]
    pub members: BTreeMap<String, Vec<Member>>,
    #[serde(default)]
    pub replicas: BTreeMap<String, WorkloadReplicas>,
}

impl WorldSnapshot {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::ConfigurationError(format!(
                "cannot read snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub async fn into_store(self) -> InMemoryObjectStore {
        let store = InMemoryObjectStore::new();
        let ns = self.namespace.as_str();
        for (name, spec) in self.clusters {
            store.put_cluster(ns, &name, spec).await;
        }
        for (name, status) in self.databases {
            store.put_database(ns, &name, status).await;
        }
        for (name, status) in self.coordinations {
            store.put_coordination(ns, &name, status).await;
        }
        for (name, status) in self.brokers {
            store.put_broker(ns, &name, status).await;
        }
        for (name, provider) in self.identity_providers {
            store.put_identity_provider(ns, &name, provider).await;
        }
        for (name, secret) in self.secrets {
            store.put_secret(ns, &name, secret).await;
        }
        for (cluster, members) in self.members {
            store.put_members(ns, &cluster, members).await;
        }
        for (cluster, replicas) in self.replicas {
            store.put_replicas(ns, &cluster, replicas).await;
        }
        store
    }
}

/// Replace `dir` with one file per artifact plus `status.json`
///
/// The pass is written into a staging directory beside `dir` and renamed
/// into place, so `dir` only ever holds the files of one complete pass.
pub async fn write_output(dir: &Path, artifacts: &ArtifactSet, status: &ClusterStatus) -> Result<()> {
    let name = dir.file_name().ok_or_else(|| {
        AppError::ConfigurationError(format!("output path {} names no directory", dir.display()))
    })?;
    let parent = match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent).await?;

    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(&parent)?;
    for (key, content) in artifacts.iter() {
        tokio::fs::write(staging.path().join(key), content).await?;
    }
    let status_json = serde_json::to_string_pretty(status)?;
    tokio::fs::write(staging.path().join(STATUS_FILE), status_json).await?;

    let retired = parent.join(format!(
        ".{}.retired-{}",
        name.to_string_lossy(),
        Uuid::new_v4()
    ));
    let had_previous = tokio::fs::try_exists(dir).await?;
    if had_previous {
        tokio::fs::rename(dir, &retired).await?;
    }
    if let Err(e) = tokio::fs::rename(staging.path(), dir).await {
        if had_previous {
            tokio::fs::rename(&retired, dir).await?;
        }
        return Err(e.into());
    }
    if had_previous {
        tokio::fs::remove_dir_all(&retired).await?;
    }

    info!("📁 Wrote {} artifacts to {}", artifacts.len(), dir.display());
    Ok(())
}
