//! Status objects of the dependent clusters (tiers) and secrets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CASSANDRA_PORT: u16 = 9160;
pub const DEFAULT_CASSANDRA_CQL_PORT: u16 = 9042;
pub const DEFAULT_CASSANDRA_JMX_PORT: u16 = 7199;
pub const DEFAULT_ZOOKEEPER_CLIENT_PORT: u16 = 2181;
pub const DEFAULT_RABBITMQ_PORT: u16 = 5673;
pub const DEFAULT_RABBITMQ_SSL_PORT: u16 = 5671;
pub const DEFAULT_KEYSTONE_PORT: u16 = 5555;

fn default_cassandra_port() -> u16 {
    DEFAULT_CASSANDRA_PORT
}

fn default_cassandra_cql_port() -> u16 {
    DEFAULT_CASSANDRA_CQL_PORT
}

fn default_cassandra_jmx_port() -> u16 {
    DEFAULT_CASSANDRA_JMX_PORT
}

fn default_zookeeper_client_port() -> u16 {
    DEFAULT_ZOOKEEPER_CLIENT_PORT
}

fn default_rabbitmq_port() -> u16 {
    DEFAULT_RABBITMQ_PORT
}

fn default_rabbitmq_ssl_port() -> u16 {
    DEFAULT_RABBITMQ_SSL_PORT
}

fn default_keystone_port() -> u16 {
    DEFAULT_KEYSTONE_PORT
}

/// Database (cassandra) tier status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    /// Member name to member address
    #[serde(default)]
    pub nodes: BTreeMap<String, String>,
    #[serde(default)]
    pub cluster_ip: Option<String>,
    /// Client (thrift) port
    #[serde(default = "default_cassandra_port")]
    pub port: u16,
    /// Wire protocol (CQL) port
    #[serde(default = "default_cassandra_cql_port")]
    pub cql_port: u16,
    /// Management (JMX) port
    #[serde(default = "default_cassandra_jmx_port")]
    pub jmx_port: u16,
}

/// Coordination service (zookeeper) tier status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinationStatus {
    #[serde(default)]
    pub nodes: BTreeMap<String, String>,
    #[serde(default = "default_zookeeper_client_port")]
    pub client_port: u16,
}

/// Message broker (rabbitmq) tier status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerStatus {
    #[serde(default)]
    pub nodes: BTreeMap<String, String>,
    #[serde(default = "default_rabbitmq_port")]
    pub port: u16,
    #[serde(default = "default_rabbitmq_ssl_port")]
    pub ssl_port: u16,
    /// Secret holding `user`, `password` and `vhost`
    #[serde(default)]
    pub secret: Option<String>,
}

/// Identity provider (keystone) instance: its spec attributes and status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_keystone_port")]
    pub listen_port: u16,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub auth_protocol: String,
    #[serde(default)]
    pub user_domain_name: String,
    #[serde(default)]
    pub project_domain_name: String,
}

/// Secret object data, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

fn node_map<'a>(nodes: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    nodes
        .into_iter()
        .map(|(name, ip)| (name.to_string(), ip.to_string()))
        .collect()
}

impl DatabaseStatus {
    /// Status with the given `(member, ip)` pairs and default ports
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            nodes: node_map(nodes),
            cluster_ip: None,
            port: DEFAULT_CASSANDRA_PORT,
            cql_port: DEFAULT_CASSANDRA_CQL_PORT,
            jmx_port: DEFAULT_CASSANDRA_JMX_PORT,
        }
    }
}

impl CoordinationStatus {
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            nodes: node_map(nodes),
            client_port: DEFAULT_ZOOKEEPER_CLIENT_PORT,
        }
    }
}

impl BrokerStatus {
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            nodes: node_map(nodes),
            port: DEFAULT_RABBITMQ_PORT,
            ssl_port: DEFAULT_RABBITMQ_SSL_PORT,
            secret: None,
        }
    }
}

impl Secret {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            data: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Field value, `None` when absent or empty
    pub fn field(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
