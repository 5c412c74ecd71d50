//! Status monitor configuration, one YAML document per member

use serde::{Deserialize, Serialize};

use crate::domain::entities::Member;
use crate::error::Result;
use crate::reconciler::resolver::EffectiveConfig;

pub const MONITOR_NODE_TYPE: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    pub hostname: String,
    pub node_type: String,
    pub pod_ip: String,
    pub pod_name: String,
    pub cluster_name: String,
    pub namespace: String,
    /// `ip:port::service`, ordered by service name
    pub introspect_nodes: Vec<String>,
}

/// Introspect port of every config service, ordered by service name
pub fn introspect_ports(config: &EffectiveConfig) -> Vec<(&'static str, u16)> {
    let mut ports = vec![
        ("contrail-api", config.api_introspect_port),
        ("contrail-schema", config.schema_introspect_port),
        ("contrail-device-manager", config.device_manager_introspect_port),
        ("contrail-svc-monitor", config.svc_monitor_introspect_port),
        ("contrail-analytics-api", config.analytics_api_introspect_port),
        ("contrail-collector", config.collector_introspect_port),
    ];
    ports.sort_by_key(|(service, _)| *service);
    ports
}

impl MonitorConfig {
    pub fn for_member(
        config: &EffectiveConfig,
        member: &Member,
        cluster_name: &str,
        namespace: &str,
    ) -> Self {
        let introspect_nodes = introspect_ports(config)
            .into_iter()
            .map(|(service, port)| format!("{}:{}::{}", member.ip, port, service))
            .collect();
        Self {
            hostname: member.display_hostname().to_string(),
            node_type: MONITOR_NODE_TYPE.to_string(),
            pod_ip: member.ip.clone(),
            pod_name: member.name.clone(),
            cluster_name: cluster_name.to_string(),
            namespace: namespace.to_string(),
            introspect_nodes,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
