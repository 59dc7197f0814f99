// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the rename cascade
//!
//! Whatever the assignments look like, after a rename no record may refer
//! to the old name and every auto-DNS assignment must be published under
//! the new one.

use cim_ipam::dns::RecordType;
use cim_ipam::RenameHostCommand;
use proptest::prelude::*;

use crate::fixtures::*;

#[derive(Debug, Clone)]
struct Plan {
    last_octet: u8,
    interface: Option<String>,
    primary: bool,
    auto_dns: bool,
}

fn plans() -> impl Strategy<Value = Vec<Plan>> {
    prop::collection::btree_map(
        1u8..=254,
        (prop::option::of("[a-z][a-z0-9]{0,6}"), any::<bool>(), any::<bool>()),
        1..6,
    )
    .prop_map(|by_octet| {
        by_octet
            .into_iter()
            .enumerate()
            .map(|(i, (last_octet, (interface, primary, auto_dns)))| Plan {
                last_octet,
                // Suffix keeps interface labels unique per host.
                interface: interface.map(|label| format!("{label}{i}")),
                primary,
                auto_dns,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: rename leaves no record pointing at the old name
    #[test]
    fn prop_rename_leaves_no_stale_records(plans in plans()) {
        let h = Harness::standard();

        let (records, expected_forward) = tokio_test::block_on(async {
            let host = h.register("oldhost").await;
            let mut expected_forward = 0;
            for plan in &plans {
                let mut command = h
                    .assign(host.id, &format!("10.0.0.{}", plan.last_octet))
                    .primary(plan.primary)
                    .auto_dns(plan.auto_dns);
                if let Some(interface) = &plan.interface {
                    command = command.interface(hostname(interface));
                }
                h.assignments.create(command).await.unwrap();
                if plan.auto_dns {
                    expected_forward += 1;
                }
            }

            h.hosts
                .rename(RenameHostCommand {
                    host_id: host.id,
                    new_name: hostname("newhost"),
                    timestamp: fixed_timestamp(),
                    correlation_id: correlation_id(),
                })
                .await
                .unwrap();

            (h.store.records().await, expected_forward)
        });

        for record in &records {
            prop_assert!(!record.name.contains("oldhost"), "stale name {}", record);
            prop_assert!(!record.content.contains("oldhost"), "stale content {}", record);
        }

        let forward: Vec<_> = records
            .iter()
            .filter(|r| r.record_type == RecordType::A)
            .collect();
        prop_assert_eq!(forward.len(), expected_forward);
        prop_assert!(forward.iter().all(|r| r.name.ends_with("newhost.example.com")));
    }
}
