// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for network normalization
//!
//! Normalizing CIDR text must be idempotent and must never move an address
//! out of the network it was written in.

use cim_ipam::domain::{Address, IpVersion};
use cim_ipam::{InMemoryStore, SubnetAllocator};
use proptest::prelude::*;
use std::net::{Ipv4Addr, Ipv6Addr};

type Allocator = SubnetAllocator<InMemoryStore>;

fn ipv4_cidr() -> impl Strategy<Value = String> {
    (any::<u32>(), 0u8..=32)
        .prop_map(|(bits, prefix)| format!("{}/{}", Ipv4Addr::from(bits), prefix))
}

fn ipv6_cidr() -> impl Strategy<Value = String> {
    (any::<u128>(), 0u8..=128)
        .prop_map(|(bits, prefix)| format!("{}/{}", Ipv6Addr::from(bits), prefix))
}

fn any_cidr() -> impl Strategy<Value = String> {
    prop_oneof![ipv4_cidr(), ipv6_cidr()]
}

proptest! {
    /// Property: normalize(normalize(x)) == normalize(x)
    #[test]
    fn prop_normalize_is_idempotent(cidr in any_cidr()) {
        let once = Allocator::normalize(&cidr).unwrap();
        let twice = Allocator::normalize(&once.to_string()).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// Property: the written address lies inside its normalized network
    #[test]
    fn prop_normalized_network_contains_input(cidr in any_cidr()) {
        let network = Allocator::normalize(&cidr).unwrap();
        let (address, _) = cidr.split_once('/').unwrap();
        let address: Address = address.parse().unwrap();

        prop_assert!(network.contains(&address));
        prop_assert_eq!(network.first_address(), network.base());
        prop_assert!(network.first_address() <= network.last_address());
    }

    /// Property: IPv4 host iteration never includes network or broadcast
    /// below /31
    #[test]
    fn prop_ipv4_hosts_exclude_edges(bits in any::<u32>(), prefix in 24u8..=30) {
        let cidr = format!("{}/{}", Ipv4Addr::from(bits), prefix);
        let network = Allocator::normalize(&cidr).unwrap();
        prop_assert_eq!(network.version(), IpVersion::V4);

        let hosts: Vec<Address> = network.hosts().collect();
        prop_assert_eq!(hosts.len() as u128, network.num_addresses().unwrap() - 2);
        prop_assert!(!hosts.contains(&network.first_address()));
        prop_assert!(!hosts.contains(&network.last_address()));
    }
}
