pub mod cluster;

pub use cluster::{
    ClusterSpecRepository, MemberRepository, SecretRepository, StatusRepository, TierRepository,
};
