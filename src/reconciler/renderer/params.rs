//! Per-service template parameters
//!
//! Each service gets one construction function that maps the resolved
//! configuration, the topology and the credentials onto the exact parameter
//! names its template uses.

use std::collections::BTreeMap;

use crate::domain::entities::Member;
use crate::reconciler::credentials::CredentialBundle;
use crate::reconciler::resolver::EffectiveConfig;
use crate::reconciler::topology::TopologySnapshot;

/// Run mode handed to every device manager
pub const DEVICE_MANAGER_RUN_MODE: &str = "Full";

/// Named values substituted into one template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceParams {
    values: BTreeMap<&'static str, String>,
}

impl ServiceParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl ToString) -> Self {
        self.values.insert(name, value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Connection strings shared by every member of one pass, built once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLists {
    pub api_servers: String,
    pub analytics_servers: String,
    pub api_servers_spaced: String,
    pub analytics_servers_spaced: String,
    pub collector_servers: String,
    pub redis_servers: String,
    pub cassandra_endpoint: String,
    pub cassandra_cql_spaced: String,
    pub zookeeper_servers: String,
    pub zookeeper_servers_spaced: String,
    pub rabbitmq_servers: String,
    pub rabbitmq_servers_spaced: String,
}

impl SharedLists {
    pub fn build(config: &EffectiveConfig, topology: &TopologySnapshot) -> Self {
        let own = &topology.members;
        Self {
            api_servers: own.comma_joined(),
            analytics_servers: own.comma_joined(),
            api_servers_spaced: own.space_joined_with_port(config.api_port),
            analytics_servers_spaced: own.space_joined_with_port(config.analytics_port),
            collector_servers: own.space_joined_with_port(config.collector_port),
            redis_servers: own.space_joined_with_port(config.redis_port),
            cassandra_endpoint: topology.database.endpoint(),
            cassandra_cql_spaced: topology.database.cql_space_joined(),
            zookeeper_servers: topology.coordination.comma_joined(),
            zookeeper_servers_spaced: topology.coordination.space_joined(),
            rabbitmq_servers: topology.broker.ssl_comma_joined(),
            rabbitmq_servers_spaced: topology.broker.ssl_space_joined(),
        }
    }
}

/// Everything a parameter set can draw from during one pass
pub struct RenderContext<'a> {
    pub config: &'a EffectiveConfig,
    pub topology: &'a TopologySnapshot,
    pub credentials: &'a CredentialBundle,
    pub ca_file_path: &'a str,
    pub lists: SharedLists,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a EffectiveConfig,
        topology: &'a TopologySnapshot,
        credentials: &'a CredentialBundle,
        ca_file_path: &'a str,
    ) -> Self {
        Self {
            config,
            topology,
            credentials,
            ca_file_path,
            lists: SharedLists::build(config, topology),
        }
    }
}

pub fn api(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ListenPort", ctx.config.api_port)
        .set("CassandraServerList", &ctx.lists.cassandra_endpoint)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("AuthMode", ctx.config.auth_mode)
        .set("AAAMode", ctx.config.aaa_mode)
        .set("LogLevel", &ctx.config.log_level)
        .set("CAFilePath", ctx.ca_file_path)
        .set("ApiIntrospectPort", ctx.config.api_introspect_port)
}

pub fn vnc(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let identity = &ctx.credentials.identity;
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ListenPort", ctx.config.api_port)
        .set("AuthMode", ctx.config.auth_mode)
        .set("CAFilePath", ctx.ca_file_path)
        .set("KeystoneAddress", &identity.address)
        .set("KeystonePort", identity.port)
        .set("KeystoneUserDomainName", &identity.user_domain_name)
        .set("KeystoneAuthProtocol", &identity.auth_protocol)
}

pub fn device_manager(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    let fabric_mgmt_ip = ctx.config.fabric_mgmt_ip.for_member(&member.ip);
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ApiServerList", &ctx.lists.api_servers)
        .set("AnalyticsServerList", &ctx.lists.analytics_servers)
        .set("CassandraServerList", &ctx.lists.cassandra_endpoint)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("LogLevel", &ctx.config.log_level)
        .set("FabricMgmtIP", fabric_mgmt_ip)
        .set("CAFilePath", ctx.ca_file_path)
        .set(
            "DeviceManagerIntrospectPort",
            ctx.config.device_manager_introspect_port,
        )
        .set("DMRunMode", DEVICE_MANAGER_RUN_MODE)
}

pub fn fabric_ansible(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("LogLevel", &ctx.config.log_level)
        .set("CAFilePath", ctx.ca_file_path)
}

pub fn schema_transformer(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ApiServerList", &ctx.lists.api_servers)
        .set("AnalyticsServerList", &ctx.lists.analytics_servers)
        .set("CassandraServerList", &ctx.lists.cassandra_endpoint)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("LogLevel", &ctx.config.log_level)
        .set("CAFilePath", ctx.ca_file_path)
        .set("SchemaIntrospectPort", ctx.config.schema_introspect_port)
}

pub fn service_monitor(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ApiServerList", &ctx.lists.api_servers)
        .set("AnalyticsServerList", &ctx.lists.analytics_servers_spaced)
        .set("CassandraServerList", &ctx.lists.cassandra_endpoint)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("AAAMode", ctx.config.aaa_mode)
        .set("LogLevel", &ctx.config.log_level)
        .set("CAFilePath", ctx.ca_file_path)
        .set("SvcMonitorIntrospectPort", ctx.config.svc_monitor_introspect_port)
}

pub fn analytics_api(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    ServiceParams::new()
        .set("HostIP", &member.ip)
        .set("ApiServerList", &ctx.lists.api_servers_spaced)
        .set("AnalyticsServerList", &ctx.lists.analytics_servers_spaced)
        .set("CassandraServerList", &ctx.lists.cassandra_endpoint)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers_spaced)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RedisServerList", &ctx.lists.redis_servers)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("AuthMode", ctx.config.auth_mode)
        .set("AAAMode", ctx.config.aaa_mode)
        .set("CAFilePath", ctx.ca_file_path)
        .set(
            "AnalyticsApiIntrospectPort",
            ctx.config.analytics_api_introspect_port,
        )
}

pub fn collector(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    let broker = &ctx.credentials.broker;
    ServiceParams::new()
        .set("Hostname", member.display_hostname())
        .set("HostIP", &member.ip)
        .set("ApiServerList", &ctx.lists.api_servers_spaced)
        .set("CassandraServerList", &ctx.lists.cassandra_cql_spaced)
        .set("ZookeeperServerList", &ctx.lists.zookeeper_servers)
        .set("RabbitmqServerList", &ctx.lists.rabbitmq_servers_spaced)
        .set("RabbitmqUser", &broker.user)
        .set("RabbitmqPassword", &broker.password)
        .set("RabbitmqVhost", &broker.vhost)
        .set("LogLevel", &ctx.config.log_level)
        .set("CAFilePath", ctx.ca_file_path)
        .set("CollectorIntrospectPort", ctx.config.collector_introspect_port)
        .set("AnalyticsDataTTL", ctx.config.analytics_data_ttl)
        .set("AnalyticsConfigAuditTTL", ctx.config.analytics_config_audit_ttl)
        .set("AnalyticsStatisticsTTL", ctx.config.analytics_statistics_ttl)
        .set("AnalyticsFlowTTL", ctx.config.analytics_flow_ttl)
}

pub fn query_engine(ctx: &RenderContext<'_>, member: &Member) -> ServiceParams {
    ServiceParams::new()
        .set("Hostname", member.display_hostname())
        .set("HostIP", &member.ip)
        .set("CassandraServerList", &ctx.lists.cassandra_cql_spaced)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("RedisServerList", &ctx.lists.redis_servers)
        .set("CAFilePath", ctx.ca_file_path)
        .set("AnalyticsDataTTL", ctx.config.analytics_data_ttl)
}

/// Node manager parameters for one node type (`config` or `analytics`)
pub fn node_manager(ctx: &RenderContext<'_>, member: &Member, node_type: &str) -> ServiceParams {
    ServiceParams::new()
        .set("NodeType", node_type)
        .set("HostIP", &member.ip)
        .set("CollectorServerList", &ctx.lists.collector_servers)
        .set("CassandraPort", ctx.topology.database.cql_port)
        .set("CassandraJmxPort", ctx.topology.database.jmx_port)
        .set("CAFilePath", ctx.ca_file_path)
}

/// Cluster-wide identity provider admin parameters
pub fn keystone_auth(ctx: &RenderContext<'_>) -> ServiceParams {
    let identity = &ctx.credentials.identity;
    ServiceParams::new()
        .set("AdminUsername", &identity.admin_username)
        .set("AdminPassword", &identity.admin_password)
        .set("KeystoneAddress", &identity.address)
        .set("KeystonePort", identity.port)
        .set("KeystoneAuthProtocol", &identity.auth_protocol)
        .set("KeystoneUserDomainName", &identity.user_domain_name)
        .set("KeystoneProjectDomainName", &identity.project_domain_name)
        .set("KeystoneRegion", &identity.region)
        .set("CAFilePath", ctx.ca_file_path)
}
