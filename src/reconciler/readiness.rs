//! Staged bootstrap of cluster members
//!
//! Members start one after another in name order: a member may treat the
//! others as existing peers only once every member before it reports all of
//! its containers ready. Independently, the cluster is active once a simple
//! majority of the declared replicas is ready.

use std::collections::BTreeMap;

use crate::domain::entities::{Member, WorkloadReplicas};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessState {
    /// Member name to peer-ready flag, ordered by name
    pub peer_ready: BTreeMap<String, bool>,
    pub active: bool,
}

impl ReadinessState {
    pub fn ready_count(&self) -> usize {
        self.peer_ready.values().filter(|ready| **ready).count()
    }
}

/// Ready replicas needed for the cluster to count as active.
///
/// A missing or non-positive declaration counts as one replica.
pub fn active_threshold(declared: Option<i32>) -> i32 {
    let replicas = declared.filter(|r| *r > 0).unwrap_or(1);
    replicas / 2 + 1
}

/// Peer-ready flag of every member under the sequential barrier
pub fn peer_barrier(members: &[Member]) -> BTreeMap<String, bool> {
    let mut ordered: Vec<&Member> = members.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let mut flags = BTreeMap::new();
    let mut predecessors_ready = true;
    for member in ordered {
        flags.insert(member.name.clone(), predecessors_ready);
        predecessors_ready = predecessors_ready && member.all_containers_ready();
    }
    flags
}

pub fn evaluate(members: &[Member], replicas: &WorkloadReplicas) -> ReadinessState {
    ReadinessState {
        peer_ready: peer_barrier(members),
        active: replicas.ready >= active_threshold(replicas.declared),
    }
}
