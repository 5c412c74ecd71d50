//! Default resolution for config cluster specifications
//!
//! Turns a sparse [`ClusterSpec`] into an [`EffectiveConfig`] in which every
//! scalar carries either the user value or a compiled-in default.

use tracing::debug;

use crate::domain::entities::{AaaMode, AuthenticationMode, ClusterSpec};

pub const DEFAULT_API_PORT: u16 = 8082;
pub const DEFAULT_ANALYTICS_PORT: u16 = 8081;
pub const DEFAULT_COLLECTOR_PORT: u16 = 8086;
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_API_INTROSPECT_PORT: u16 = 8084;
pub const DEFAULT_SCHEMA_INTROSPECT_PORT: u16 = 8087;
pub const DEFAULT_DEVICE_MANAGER_INTROSPECT_PORT: u16 = 8096;
pub const DEFAULT_SVC_MONITOR_INTROSPECT_PORT: u16 = 8088;
pub const DEFAULT_ANALYTICS_API_INTROSPECT_PORT: u16 = 8090;
pub const DEFAULT_COLLECTOR_INTROSPECT_PORT: u16 = 8089;

pub const DEFAULT_LOG_LEVEL: &str = "SYS_NOTICE";
pub const DEFAULT_RABBITMQ_USER: &str = "guest";
pub const DEFAULT_RABBITMQ_PASSWORD: &str = "guest";
pub const DEFAULT_RABBITMQ_VHOST: &str = "/";
pub const DEFAULT_KEYSTONE_ADMIN_PASSWORD: &str = "contrail123";

pub const DEFAULT_ANALYTICS_DATA_TTL: u32 = 48;
pub const DEFAULT_ANALYTICS_CONFIG_AUDIT_TTL: u32 = 2160;
pub const DEFAULT_ANALYTICS_STATISTICS_TTL: u32 = 4;
pub const DEFAULT_ANALYTICS_FLOW_TTL: u32 = 2;

/// Address the device manager announces on the fabric
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FabricMgmtAddress {
    /// Each member announces its own pod IP
    MemberIp,
    Fixed(String),
}

impl FabricMgmtAddress {
    fn from_spec(value: &Option<String>) -> Self {
        match value.as_deref() {
            Some(ip) if !ip.is_empty() => FabricMgmtAddress::Fixed(ip.to_string()),
            _ => FabricMgmtAddress::MemberIp,
        }
    }

    pub fn for_member<'a>(&'a self, member_ip: &'a str) -> &'a str {
        match self {
            FabricMgmtAddress::MemberIp => member_ip,
            FabricMgmtAddress::Fixed(ip) => ip,
        }
    }
}

/// Fully resolved configuration of a config cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub api_port: u16,
    pub analytics_port: u16,
    pub collector_port: u16,
    pub redis_port: u16,
    pub api_introspect_port: u16,
    pub schema_introspect_port: u16,
    pub device_manager_introspect_port: u16,
    pub svc_monitor_introspect_port: u16,
    pub analytics_api_introspect_port: u16,
    pub collector_introspect_port: u16,

    pub analytics_data_ttl: u32,
    pub analytics_config_audit_ttl: u32,
    pub analytics_statistics_ttl: u32,
    pub analytics_flow_ttl: u32,

    pub auth_mode: AuthenticationMode,
    pub aaa_mode: AaaMode,
    pub log_level: String,
    pub node_manager: bool,
    pub fabric_mgmt_ip: FabricMgmtAddress,

    pub rabbitmq_user: String,
    pub rabbitmq_password: String,
    pub rabbitmq_vhost: String,
    pub keystone_admin_password: String,
}

fn port_or(value: Option<u16>, default: u16) -> u16 {
    value.filter(|v| *v != 0).unwrap_or(default)
}

fn hours_or(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v != 0).unwrap_or(default)
}

fn text_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Resolve a specification against the compiled-in defaults.
///
/// Total over every input. The authorization mode is the only field whose
/// default depends on another field: keystone authentication implies rbac.
pub fn resolve(spec: &ClusterSpec) -> EffectiveConfig {
    let auth_mode = spec.auth_mode.unwrap_or(AuthenticationMode::NoAuth);
    let aaa_mode = spec.aaa_mode.unwrap_or(match auth_mode {
        AuthenticationMode::Keystone => AaaMode::Rbac,
        AuthenticationMode::NoAuth => AaaMode::NoAuth,
    });

    let config = EffectiveConfig {
        api_port: port_or(spec.api_port, DEFAULT_API_PORT),
        analytics_port: port_or(spec.analytics_port, DEFAULT_ANALYTICS_PORT),
        collector_port: port_or(spec.collector_port, DEFAULT_COLLECTOR_PORT),
        redis_port: port_or(spec.redis_port, DEFAULT_REDIS_PORT),
        api_introspect_port: port_or(spec.api_introspect_port, DEFAULT_API_INTROSPECT_PORT),
        schema_introspect_port: port_or(
            spec.schema_introspect_port,
            DEFAULT_SCHEMA_INTROSPECT_PORT,
        ),
        device_manager_introspect_port: port_or(
            spec.device_manager_introspect_port,
            DEFAULT_DEVICE_MANAGER_INTROSPECT_PORT,
        ),
        svc_monitor_introspect_port: port_or(
            spec.svc_monitor_introspect_port,
            DEFAULT_SVC_MONITOR_INTROSPECT_PORT,
        ),
        analytics_api_introspect_port: port_or(
            spec.analytics_api_introspect_port,
            DEFAULT_ANALYTICS_API_INTROSPECT_PORT,
        ),
        collector_introspect_port: port_or(
            spec.collector_introspect_port,
            DEFAULT_COLLECTOR_INTROSPECT_PORT,
        ),
        analytics_data_ttl: hours_or(spec.analytics_data_ttl, DEFAULT_ANALYTICS_DATA_TTL),
        analytics_config_audit_ttl: hours_or(
            spec.analytics_config_audit_ttl,
            DEFAULT_ANALYTICS_CONFIG_AUDIT_TTL,
        ),
        analytics_statistics_ttl: hours_or(
            spec.analytics_statistics_ttl,
            DEFAULT_ANALYTICS_STATISTICS_TTL,
        ),
        analytics_flow_ttl: hours_or(spec.analytics_flow_ttl, DEFAULT_ANALYTICS_FLOW_TTL),
        auth_mode,
        aaa_mode,
        log_level: text_or(&spec.log_level, DEFAULT_LOG_LEVEL),
        node_manager: spec.node_manager.unwrap_or(true),
        fabric_mgmt_ip: FabricMgmtAddress::from_spec(&spec.fabric_mgmt_ip),
        rabbitmq_user: text_or(&spec.rabbitmq_user, DEFAULT_RABBITMQ_USER),
        rabbitmq_password: text_or(&spec.rabbitmq_password, DEFAULT_RABBITMQ_PASSWORD),
        rabbitmq_vhost: text_or(&spec.rabbitmq_vhost, DEFAULT_RABBITMQ_VHOST),
        keystone_admin_password: text_or(
            &spec.keystone_admin_password,
            DEFAULT_KEYSTONE_ADMIN_PASSWORD,
        ),
    };

    debug!(
        "🔧 Resolved config: api={} analytics={} collector={} redis={} auth={} aaa={}",
        config.api_port,
        config.analytics_port,
        config.collector_port,
        config.redis_port,
        config.auth_mode,
        config.aaa_mode
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_resolves_to_defaults() {
        let config = resolve(&ClusterSpec::default());
        assert_eq!(config.api_port, DEFAULT_API_PORT);
        assert_eq!(config.analytics_port, DEFAULT_ANALYTICS_PORT);
        assert_eq!(config.collector_port, DEFAULT_COLLECTOR_PORT);
        assert_eq!(config.redis_port, DEFAULT_REDIS_PORT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.rabbitmq_vhost, "/");
        assert_eq!(config.analytics_config_audit_ttl, 2160);
        assert!(config.node_manager);
        assert_eq!(config.auth_mode, AuthenticationMode::NoAuth);
        assert_eq!(config.aaa_mode, AaaMode::NoAuth);
    }

    #[test]
    fn test_keystone_defaults_aaa_mode_to_rbac() {
        let spec = ClusterSpec {
            auth_mode: Some(AuthenticationMode::Keystone),
            ..Default::default()
        };
        assert_eq!(resolve(&spec).aaa_mode, AaaMode::Rbac);
    }

    #[test]
    fn test_explicit_aaa_mode_wins_over_derived_default() {
        let spec = ClusterSpec {
            auth_mode: Some(AuthenticationMode::Keystone),
            aaa_mode: Some(AaaMode::NoAuth),
            ..Default::default()
        };
        assert_eq!(resolve(&spec).aaa_mode, AaaMode::NoAuth);

        let spec = ClusterSpec {
            aaa_mode: Some(AaaMode::Rbac),
            ..Default::default()
        };
        assert_eq!(resolve(&spec).aaa_mode, AaaMode::Rbac);
    }

    #[test]
    fn test_zero_and_empty_values_fall_back() {
        let spec = ClusterSpec {
            api_port: Some(0),
            analytics_data_ttl: Some(0),
            log_level: Some(String::new()),
            rabbitmq_user: Some(String::new()),
            ..Default::default()
        };
        let config = resolve(&spec);
        assert_eq!(config.api_port, DEFAULT_API_PORT);
        assert_eq!(config.analytics_data_ttl, DEFAULT_ANALYTICS_DATA_TTL);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.rabbitmq_user, DEFAULT_RABBITMQ_USER);
    }

    #[test]
    fn test_user_values_are_used_verbatim() {
        let spec = ClusterSpec {
            api_port: Some(9100),
            collector_introspect_port: Some(9189),
            analytics_flow_ttl: Some(12),
            log_level: Some("SYS_DEBUG".to_string()),
            node_manager: Some(false),
            ..Default::default()
        };
        let config = resolve(&spec);
        assert_eq!(config.api_port, 9100);
        assert_eq!(config.collector_introspect_port, 9189);
        assert_eq!(config.analytics_flow_ttl, 12);
        assert_eq!(config.log_level, "SYS_DEBUG");
        assert!(!config.node_manager);
    }

    #[test]
    fn test_fabric_mgmt_address_resolution() {
        let config = resolve(&ClusterSpec::default());
        assert_eq!(config.fabric_mgmt_ip, FabricMgmtAddress::MemberIp);
        assert_eq!(config.fabric_mgmt_ip.for_member("10.0.0.4"), "10.0.0.4");

        let spec = ClusterSpec {
            fabric_mgmt_ip: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(resolve(&spec).fabric_mgmt_ip, FabricMgmtAddress::MemberIp);

        let spec = ClusterSpec {
            fabric_mgmt_ip: Some("192.168.10.1".to_string()),
            ..Default::default()
        };
        let config = resolve(&spec);
        assert_eq!(config.fabric_mgmt_ip.for_member("10.0.0.4"), "192.168.10.1");
    }
}
