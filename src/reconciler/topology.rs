//! Topology aggregation across the dependent tiers
//!
//! Every connection string a consumer service needs is derived from one
//! sorted [`EndpointList`] per tier. Nothing is fetched per representation,
//! so all strings built within a pass agree with each other.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{DependencyRefs, Member};
use crate::domain::repositories::TierRepository;
use crate::error::{AppError, Result};
use crate::storage::StoreError;

/// Member addresses of one tier, sorted ascending as strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointList {
    ips: Vec<String>,
}

impl EndpointList {
    pub fn from_ips<I, S>(ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ips: Vec<String> = ips.into_iter().map(Into::into).collect();
        // stable, so equal addresses keep retrieval order
        ips.sort();
        Self { ips }
    }

    pub fn from_members(members: &[Member]) -> Self {
        Self::from_ips(members.iter().map(|m| m.ip.clone()))
    }

    pub fn ips(&self) -> &[String] {
        &self.ips
    }

    pub fn len(&self) -> usize {
        self.ips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// `ip1,ip2,...`
    pub fn comma_joined(&self) -> String {
        self.ips.join(",")
    }

    /// `ip1:port,ip2:port,...`
    pub fn comma_joined_with_port(&self, port: u16) -> String {
        self.ips
            .iter()
            .map(|ip| format!("{}:{}", ip, port))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `ip1:port ip2:port ... ipN:port:port`
    ///
    /// The trailing `:port` after the last entry is part of the format one
    /// consumer's parser expects and must stay.
    pub fn space_joined_with_port(&self, port: u16) -> String {
        let mut joined = self
            .ips
            .iter()
            .map(|ip| format!("{}:{}", ip, port))
            .collect::<Vec<_>>()
            .join(" ");
        joined.push_str(&format!(":{}", port));
        joined
    }
}

/// Database tier endpoints and ports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseTopology {
    pub servers: EndpointList,
    pub cluster_ip: Option<String>,
    pub port: u16,
    pub cql_port: u16,
    pub jmx_port: u16,
}

impl DatabaseTopology {
    /// Service endpoint when the tier exposes a cluster IP, else the full
    /// client-port server list
    pub fn endpoint(&self) -> String {
        match self.cluster_ip.as_deref() {
            Some(ip) if !ip.is_empty() => format!("{}:{}", ip, self.port),
            _ => self.servers.comma_joined_with_port(self.port),
        }
    }

    pub fn cql_space_joined(&self) -> String {
        self.servers.space_joined_with_port(self.cql_port)
    }
}

/// Coordination tier endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinationTopology {
    pub servers: EndpointList,
    pub client_port: u16,
}

impl CoordinationTopology {
    pub fn comma_joined(&self) -> String {
        self.servers.comma_joined_with_port(self.client_port)
    }

    pub fn space_joined(&self) -> String {
        self.servers.space_joined_with_port(self.client_port)
    }
}

/// Broker tier endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerTopology {
    pub servers: EndpointList,
    pub port: u16,
    pub ssl_port: u16,
    /// Credentials secret named by the broker status
    pub secret: Option<String>,
}

impl BrokerTopology {
    pub fn ssl_comma_joined(&self) -> String {
        self.servers.comma_joined_with_port(self.ssl_port)
    }

    pub fn ssl_space_joined(&self) -> String {
        self.servers.space_joined_with_port(self.ssl_port)
    }
}

/// Aggregated view of the cluster's own members and every dependent tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologySnapshot {
    pub members: EndpointList,
    pub database: DatabaseTopology,
    pub coordination: CoordinationTopology,
    pub broker: BrokerTopology,
}

/// Fetches tier statuses and builds a [`TopologySnapshot`]
pub struct TopologyAggregator {
    tiers: Arc<dyn TierRepository>,
}

fn require_ref<'a>(kind: &'static str, name: &'a str) -> Result<&'a str> {
    if name.is_empty() {
        return Err(AppError::dependency(
            kind,
            name,
            StoreError::NotFound(format!("no {} instance referenced", kind)),
        ));
    }
    Ok(name)
}

impl TopologyAggregator {
    pub fn new(tiers: Arc<dyn TierRepository>) -> Self {
        Self { tiers }
    }

    /// Build the snapshot for one pass. Any unreadable tier aborts it.
    pub async fn aggregate(
        &self,
        namespace: &str,
        refs: &DependencyRefs,
        members: &[Member],
    ) -> Result<TopologySnapshot> {
        let database_name = require_ref("database", &refs.cassandra_instance)?;
        let database = self
            .tiers
            .get_database(namespace, database_name)
            .await
            .map_err(|e| AppError::dependency("database", database_name, e))?;

        let coordination_name = require_ref("coordination", &refs.zookeeper_instance)?;
        let coordination = self
            .tiers
            .get_coordination(namespace, coordination_name)
            .await
            .map_err(|e| AppError::dependency("coordination", coordination_name, e))?;

        let broker_name = require_ref("broker", &refs.rabbitmq_instance)?;
        let broker = self
            .tiers
            .get_broker(namespace, broker_name)
            .await
            .map_err(|e| AppError::dependency("broker", broker_name, e))?;

        let snapshot = TopologySnapshot {
            members: EndpointList::from_members(members),
            database: DatabaseTopology {
                servers: EndpointList::from_ips(database.nodes.into_values()),
                cluster_ip: database.cluster_ip,
                port: database.port,
                cql_port: database.cql_port,
                jmx_port: database.jmx_port,
            },
            coordination: CoordinationTopology {
                servers: EndpointList::from_ips(coordination.nodes.into_values()),
                client_port: coordination.client_port,
            },
            broker: BrokerTopology {
                servers: EndpointList::from_ips(broker.nodes.into_values()),
                port: broker.port,
                ssl_port: broker.ssl_port,
                secret: broker.secret.filter(|s| !s.is_empty()),
            },
        };

        debug!(
            "🗺️ Database endpoint {}, coordination servers {}, broker servers {}",
            snapshot.database.endpoint(),
            snapshot.coordination.comma_joined(),
            snapshot.broker.ssl_comma_joined()
        );
        info!(
            "Aggregated topology: {} members, {} database, {} coordination, {} broker nodes",
            snapshot.members.len(),
            snapshot.database.servers.len(),
            snapshot.coordination.servers.len(),
            snapshot.broker.servers.len()
        );
        Ok(snapshot)
    }
}
