//! Config cluster entities
//!
//! The user-facing cluster specification and the status this operator
//! publishes back for it. Field names follow the camelCase layout of the
//! custom resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Authentication mode of the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthenticationMode {
    #[default]
    #[serde(rename = "noauth")]
    NoAuth,
    #[serde(rename = "keystone")]
    Keystone,
}

impl AuthenticationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationMode::NoAuth => "noauth",
            AuthenticationMode::Keystone => "keystone",
        }
    }
}

impl fmt::Display for AuthenticationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization (AAA) mode of the API server and its consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AaaMode {
    #[default]
    #[serde(rename = "no-auth")]
    NoAuth,
    #[serde(rename = "rbac")]
    Rbac,
}

impl AaaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AaaMode::NoAuth => "no-auth",
            AaaMode::Rbac => "rbac",
        }
    }
}

impl fmt::Display for AaaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse, user-supplied configuration of one config cluster.
///
/// Every scalar is optional; unset, zero and empty values are all treated
/// as "use the default" by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSpec {
    pub api_port: Option<u16>,
    pub analytics_port: Option<u16>,
    pub collector_port: Option<u16>,
    pub redis_port: Option<u16>,
    pub api_introspect_port: Option<u16>,
    pub schema_introspect_port: Option<u16>,
    pub device_manager_introspect_port: Option<u16>,
    pub svc_monitor_introspect_port: Option<u16>,
    pub analytics_api_introspect_port: Option<u16>,
    pub collector_introspect_port: Option<u16>,

    /// Hours analytics object and log data stays in the database
    pub analytics_data_ttl: Option<u32>,
    /// Hours config audit data entering the collector stays in the database
    pub analytics_config_audit_ttl: Option<u32>,
    /// Hours statistics data is kept
    pub analytics_statistics_ttl: Option<u32>,
    /// Hours flow data is kept
    pub analytics_flow_ttl: Option<u32>,

    pub auth_mode: Option<AuthenticationMode>,
    pub aaa_mode: Option<AaaMode>,
    pub log_level: Option<String>,
    pub node_manager: Option<bool>,
    pub fabric_mgmt_ip: Option<String>,

    pub rabbitmq_user: Option<String>,
    pub rabbitmq_password: Option<String>,
    pub rabbitmq_vhost: Option<String>,
    /// Fallback admin password when no keystone secret is named
    pub keystone_admin_password: Option<String>,

    #[serde(flatten)]
    pub dependencies: DependencyRefs,
}

/// Names of the dependent clusters and secrets a config cluster consumes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyRefs {
    pub cassandra_instance: String,
    pub zookeeper_instance: String,
    pub rabbitmq_instance: String,
    pub keystone_instance: String,
    pub keystone_secret_name: Option<String>,
}

/// Externally observable ports, rendered as strings like the resource status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPorts {
    pub api_port: String,
    pub analytics_port: String,
    pub collector_port: String,
    pub redis_port: String,
}

/// Status published for a config cluster after a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    pub active: bool,
    /// Member name to member address
    pub nodes: BTreeMap<String, String>,
    pub ports: StatusPorts,
}
