// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for subnet allocation and utilization

mod fixtures;

use test_case::test_case;

use cim_ipam::{AllocateSubnetCommand, HostCount, IpamError, Subnet};
use fixtures::*;

async fn allocate(h: &Harness, cidr: &str) -> Subnet {
    h.subnets
        .allocate(AllocateSubnetCommand::new(cidr, fixed_timestamp()))
        .await
        .unwrap()
}

/// Test: every usable host of a /30 is listed with its assignment
#[tokio::test]
async fn test_utilization_slash_30() {
    let h = Harness::standard();
    let foo = h.register("foo").await;
    let subnet = allocate(&h, "10.0.0.0/30").await;
    let used = h
        .assignments
        .create(h.assign(foo.id, "10.0.0.2"))
        .await
        .unwrap()
        .assignment;

    let usage: Vec<_> = h.subnets.utilization(&subnet).await.unwrap().collect();

    let addresses: Vec<String> = usage.iter().map(|u| u.address.to_string()).collect();
    assert_eq!(addresses, vec!["10.0.0.1", "10.0.0.2"]);
    assert!(usage[0].is_free());
    assert_eq!(usage[1].assignment.as_ref(), Some(&used));
}

/// Test: a /8 can be walked without listing all of it
#[tokio::test]
async fn test_utilization_large_subnet_is_lazy() {
    let h = Harness::standard();
    let foo = h.register("foo").await;
    let subnet = allocate(&h, "10.0.0.0/8").await;
    h.assignments
        .create(h.assign(foo.id, "10.0.0.3").auto_dns(false))
        .await
        .unwrap();

    let usage = h.subnets.utilization(&subnet).await.unwrap();
    assert_eq!(usage.size_hint(), ((1 << 24) - 2, Some((1 << 24) - 2)));

    let taken: Vec<bool> = usage.take(4).map(|u| u.is_free()).collect();
    assert_eq!(taken, vec![true, true, false, true]);
}

/// Test: in-use assignments are bounded by the network and ordered
#[tokio::test]
async fn test_in_use_is_bounded_and_ordered() {
    let h = Harness::standard();
    let foo = h.register("foo").await;
    for (i, address) in ["10.0.0.9", "10.0.0.3", "10.0.1.1", "10.0.0.0"]
        .iter()
        .enumerate()
    {
        h.assignments
            .create(
                h.assign(foo.id, address)
                    .interface(hostname(&format!("if{i}")))
                    .auto_dns(false),
            )
            .await
            .unwrap();
    }
    let subnet = allocate(&h, "10.0.0.0/28").await;

    let in_use: Vec<String> = h
        .subnets
        .in_use(&subnet)
        .await
        .unwrap()
        .iter()
        .map(|a| a.address.to_string())
        .collect();

    assert_eq!(in_use, vec!["10.0.0.0", "10.0.0.3", "10.0.0.9"]);
}

#[test_case("10.0.0.0/24" => HostCount::Exact { count: 256 } ; "ipv4")]
#[test_case("2001:db8::/56" => HostCount::Slash64Networks { exponent: 8 } ; "ipv6 above /64")]
#[test_case("2001:db8::/64" => HostCount::PowerOfTwo { exponent: 64 } ; "ipv6 /64")]
fn test_host_count(cidr: &str) -> HostCount {
    let h = Harness::standard();
    tokio_test::block_on(async {
        let subnet = allocate(&h, cidr).await;
        h.subnets.host_count(&subnet)
    })
}

/// Test: reverse names cover usable hosts only
#[tokio::test]
async fn test_reverse_names() {
    let h = Harness::standard();
    let subnet = allocate(&h, "192.0.2.8/29").await;

    let names = h.subnets.reverse_names(&subnet);

    assert_eq!(names.len(), 6);
    assert_eq!(names.first().unwrap(), "9.2.0.192.in-addr.arpa");
    assert_eq!(names.last().unwrap(), "14.2.0.192.in-addr.arpa");
}

/// Test: subnets are stored normalized and found by any spelling
#[tokio::test]
async fn test_allocate_normalizes() {
    let h = Harness::standard();
    let subnet = allocate(&h, "10.0.1.0/22").await;

    assert_eq!(subnet.network.to_string(), "10.0.0.0/22");
    assert_eq!(
        h.subnets.find_by_network("10.0.3.255/22").await.unwrap(),
        Some(subnet.clone())
    );
    assert_eq!(h.subnets.get(subnet.id).await.unwrap(), subnet);
}

/// Test: bad CIDR text is rejected before touching the store
#[tokio::test]
async fn test_allocate_invalid() {
    let h = Harness::standard();
    let err = h
        .subnets
        .allocate(AllocateSubnetCommand::new("10.0.0.0/", fixed_timestamp()))
        .await
        .unwrap_err();
    assert!(matches!(err, IpamError::InvalidNetwork(_)));
}
