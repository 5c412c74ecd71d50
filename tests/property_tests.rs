//! Property-based tests for topology ordering and staged bootstrap
//!
//! These tests use PropTest to verify properties that must hold for every
//! member set, whatever order the platform happens to list members in.

use proptest::prelude::*;

use config_cluster_operator::domain::entities::{ClusterSpec, Member, WorkloadReplicas};
use config_cluster_operator::reconciler::readiness::{active_threshold, evaluate, peer_barrier};
use config_cluster_operator::reconciler::resolver::resolve;
use config_cluster_operator::reconciler::EndpointList;

fn arb_ip() -> impl Strategy<Value = String> {
    (1u8..=254, 0u8..=255, 1u8..=254).prop_map(|(a, b, c)| format!("10.{}.{}.{}", a, b, c))
}

/// Members with unique names and their container readiness
fn arb_members() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec((arb_ip(), any::<bool>()), 1..8).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (ip, ready))| {
                Member::new(format!("config1-config-statefulset-{}", idx), ip)
                    .with_container("api", ready)
            })
            .collect()
    })
}

mod ordering_properties {
    use super::*;

    proptest! {
        #[test]
        fn joined_lists_ignore_retrieval_order(
            (ips, shuffled) in prop::collection::vec(arb_ip(), 1..10)
                .prop_flat_map(|ips| (Just(ips.clone()), Just(ips).prop_shuffle())),
            port in 1u16..=65535,
        ) {
            let a = EndpointList::from_ips(ips);
            let b = EndpointList::from_ips(shuffled);
            prop_assert_eq!(a.comma_joined(), b.comma_joined());
            prop_assert_eq!(a.comma_joined_with_port(port), b.comma_joined_with_port(port));
            prop_assert_eq!(a.space_joined_with_port(port), b.space_joined_with_port(port));
        }

        #[test]
        fn space_joined_list_ends_with_doubled_port(
            ips in prop::collection::vec(arb_ip(), 1..10),
            port in 1u16..=65535,
        ) {
            let list = EndpointList::from_ips(ips.clone());
            let joined = list.space_joined_with_port(port);
            let suffix = format!(":{}:{}", port, port);
            prop_assert!(joined.ends_with(&suffix));
            prop_assert_eq!(joined.split(' ').count(), ips.len());
        }

        #[test]
        fn comma_joined_is_sorted(ips in prop::collection::vec(arb_ip(), 0..10)) {
            let joined = EndpointList::from_ips(ips).comma_joined();
            let parts: Vec<&str> = joined.split(',').filter(|p| !p.is_empty()).collect();
            let mut sorted = parts.clone();
            sorted.sort();
            prop_assert_eq!(parts, sorted);
        }
    }
}

mod readiness_properties {
    use super::*;

    proptest! {
        #[test]
        fn peer_ready_iff_every_predecessor_ready(members in arb_members()) {
            let flags = peer_barrier(&members);
            let mut ordered = members.clone();
            ordered.sort_by(|a, b| a.name.cmp(&b.name));

            for (idx, member) in ordered.iter().enumerate() {
                let expected = ordered[..idx].iter().all(|m| m.all_containers_ready());
                prop_assert_eq!(flags[&member.name], expected);
            }
        }

        #[test]
        fn barrier_ignores_retrieval_order(members in arb_members()) {
            let mut reversed = members.clone();
            reversed.reverse();
            prop_assert_eq!(peer_barrier(&members), peer_barrier(&reversed));
        }

        #[test]
        fn active_iff_majority_ready(declared in 1i32..=9, ready in 0i32..=9) {
            let state = evaluate(&[], &WorkloadReplicas { declared: Some(declared), ready });
            prop_assert_eq!(state.active, ready > declared / 2);
            prop_assert_eq!(active_threshold(Some(declared)), declared / 2 + 1);
        }
    }
}

mod resolver_properties {
    use super::*;

    proptest! {
        #[test]
        fn resolved_ports_are_never_zero(
            api in proptest::option::of(any::<u16>()),
            collector in proptest::option::of(any::<u16>()),
            ttl in proptest::option::of(any::<u32>()),
        ) {
            let spec = ClusterSpec {
                api_port: api,
                collector_port: collector,
                analytics_flow_ttl: ttl,
                ..Default::default()
            };
            let config = resolve(&spec);
            prop_assert!(config.api_port != 0);
            prop_assert!(config.collector_port != 0);
            prop_assert!(config.analytics_flow_ttl != 0);
            prop_assert!(!config.log_level.is_empty());
            prop_assert!(!config.rabbitmq_vhost.is_empty());
        }
    }
}
