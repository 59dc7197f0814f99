// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet Allocation Entity

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Address, AddressAssignment, Hosts, IpVersion, Network, SubnetId, UserId};

/// Host capacity of a subnet
///
/// IPv6 networks are far too large to count meaningfully, so they are
/// described by exponents and formatting is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCount {
    /// Exact number of addresses (IPv4)
    Exact { count: u64 },
    /// `2^exponent` /64 networks (IPv6 shorter than /64)
    Slash64Networks { exponent: u8 },
    /// `2^exponent` addresses (IPv6 /64 or longer)
    PowerOfTwo { exponent: u8 },
}

/// One address of a subnet paired with its assignment, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUsage {
    pub address: Address,
    pub assignment: Option<AddressAssignment>,
}

impl AddressUsage {
    pub fn is_free(&self) -> bool {
        self.assignment.is_none()
    }
}

/// Lazy walk over a subnet's usable hosts, pairing each with its assignment
///
/// Only the assignments are held in memory; addresses are produced on
/// demand, so even a /8 costs nothing until iterated.
#[derive(Debug, Clone)]
pub struct Utilization {
    hosts: Hosts,
    assigned: HashMap<Address, AddressAssignment>,
}

impl Utilization {
    pub fn new(hosts: Hosts, assignments: impl IntoIterator<Item = AddressAssignment>) -> Self {
        Self {
            hosts,
            assigned: assignments.into_iter().map(|a| (a.address, a)).collect(),
        }
    }
}

impl Iterator for Utilization {
    type Item = AddressUsage;

    fn next(&mut self) -> Option<Self::Item> {
        let address = self.hosts.next()?;
        Some(AddressUsage {
            address,
            assignment: self.assigned.remove(&address),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hosts.size_hint()
    }
}

/// An allocated block of address space
///
/// # Invariants
/// - `network` is normalized (host bits cleared) and unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: SubnetId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,

    pub network: Network,

    #[serde(default)]
    pub notes: String,
}

impl Subnet {
    pub fn new(network: Network) -> Self {
        Self {
            id: SubnetId::new(),
            owner: None,
            network,
            notes: String::new(),
        }
    }

    pub fn first_address(&self) -> Address {
        self.network.first_address()
    }

    pub fn last_address(&self) -> Address {
        self.network.last_address()
    }

    pub fn host_count(&self) -> HostCount {
        let network = &self.network;
        match network.version() {
            IpVersion::V4 => HostCount::Exact {
                count: 1u64 << network.host_bits(),
            },
            IpVersion::V6 if network.prefix_len() < 64 => HostCount::Slash64Networks {
                exponent: 64 - network.prefix_len(),
            },
            IpVersion::V6 => HostCount::PowerOfTwo {
                exponent: network.host_bits(),
            },
        }
    }

    /// First word of the notes, for list views
    pub fn notes_short(&self) -> Option<&str> {
        self.notes.split_whitespace().next()
    }

    /// Host-form reverse names of every usable IPv4 host
    pub fn reverse_names(&self) -> Vec<String> {
        self.network
            .hosts()
            .map(|address| address.reverse_pointer())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn subnet(cidr: &str) -> Subnet {
        Subnet::new(cidr.parse().unwrap())
    }

    #[test_case("10.0.0.0/24" => HostCount::Exact { count: 256 } ; "ipv4 /24")]
    #[test_case("10.0.0.0/30" => HostCount::Exact { count: 4 } ; "ipv4 /30")]
    #[test_case("0.0.0.0/0" => HostCount::Exact { count: 1 << 32 } ; "ipv4 everything")]
    #[test_case("2001:db8::/48" => HostCount::Slash64Networks { exponent: 16 } ; "ipv6 /48")]
    #[test_case("2001:db8::/64" => HostCount::PowerOfTwo { exponent: 64 } ; "ipv6 /64")]
    #[test_case("2001:db8::/120" => HostCount::PowerOfTwo { exponent: 8 } ; "ipv6 /120")]
    fn test_host_count(cidr: &str) -> HostCount {
        subnet(cidr).host_count()
    }

    #[test]
    fn test_utilization_is_lazy() {
        let s = subnet("10.0.0.0/8");
        let mut usage = Utilization::new(s.network.hosts(), Vec::new());
        assert_eq!(usage.size_hint().0, (1 << 24) - 2);

        let first = usage.next().unwrap();
        assert_eq!(first.address, "10.0.0.1".parse::<Address>().unwrap());
        assert!(first.is_free());
    }

    #[test]
    fn test_address_bounds() {
        let s = subnet("10.1.2.77/29");
        assert_eq!(s.first_address(), "10.1.2.72".parse::<Address>().unwrap());
        assert_eq!(s.last_address(), "10.1.2.79".parse::<Address>().unwrap());
    }

    #[test]
    fn test_notes_short() {
        let mut s = subnet("10.0.0.0/24");
        assert_eq!(s.notes_short(), None);
        s.notes = "Tower-3 backhaul links".to_string();
        assert_eq!(s.notes_short(), Some("Tower-3"));
    }

    #[test]
    fn test_reverse_names() {
        let names = subnet("192.0.2.0/30").reverse_names();
        assert_eq!(
            names,
            vec!["1.2.0.192.in-addr.arpa", "2.2.0.192.in-addr.arpa"]
        );
        assert!(subnet("2001:db8::/64").reverse_names().is_empty());
    }
}
