pub mod artifact;
pub mod cluster;
pub mod member;
pub mod tier;

pub use artifact::ArtifactSet;
pub use cluster::{AaaMode, AuthenticationMode, ClusterSpec, ClusterStatus, DependencyRefs, StatusPorts};
pub use member::{ContainerStatus, Member, WorkloadReplicas};
pub use tier::{BrokerStatus, CoordinationStatus, DatabaseStatus, IdentityProvider, Secret};
