//! Live members of a config cluster as reported by the platform

use serde::{Deserialize, Serialize};

/// Readiness of one container inside a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    pub ready: bool,
}

/// One running replica of the config cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub ip: String,
    /// Value of the member's `hostname` annotation, when set
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerStatus>,
}

impl Member {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            hostname: None,
            containers: Vec::new(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_container(mut self, name: impl Into<String>, ready: bool) -> Self {
        self.containers.push(ContainerStatus {
            name: name.into(),
            ready,
        });
        self
    }

    /// True when every reported container is ready. A member that reports
    /// no containers has nothing blocking it.
    pub fn all_containers_ready(&self) -> bool {
        self.containers.iter().all(|c| c.ready)
    }

    /// Hostname to render into per-member artifacts
    pub fn display_hostname(&self) -> &str {
        match self.hostname.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => &self.name,
        }
    }
}

/// Declared and observed replica counts of the cluster workload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReplicas {
    pub declared: Option<i32>,
    pub ready: i32,
}
