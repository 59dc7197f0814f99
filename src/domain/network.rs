// Copyright (c) 2025 - Cowboy AI, Inc.
//! Address Space Value Objects
//!
//! Immutable IPv4/IPv6 addresses and networks, reverse-zone name derivation,
//! and host enumeration.
//!
//! # Reverse names
//!
//! ```text
//! 10.0.0.5, host form      → 5.0.0.10.in-addr.arpa
//! 10.0.0.5, boundary form  → 0.0.10.in-addr.arpa          (/24 zone)
//! 2001:db8::1, boundary    → 0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa  (/48 zone)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),

    #[error("Invalid MAC address format: {0}")]
    InvalidMacAddress(String),
}

/// Reverse-DNS suffix for IPv4
pub const IPV4_REVERSE_SUFFIX: &str = "in-addr.arpa";

/// Reverse-DNS suffix for IPv6
pub const IPV6_REVERSE_SUFFIX: &str = "ip6.arpa";

/// Number of reversed IPv6 nibbles dropped to reach the /48 zone
const IPV6_BOUNDARY_SKIP: usize = 20;

/// IP protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Address width in bits
    pub fn bits(&self) -> u8 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "4"),
            IpVersion::V6 => write!(f, "6"),
        }
    }
}

/// An IPv4 or IPv6 address
///
/// Ordered by version first and numeric value second, so all IPv4 addresses
/// sort before IPv6 ones and a range `[min, max]` within one family is a plain
/// numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(IpAddr);

impl Address {
    pub fn new(ip: IpAddr) -> Self {
        Self(ip)
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }

    pub fn version(&self) -> IpVersion {
        match self.0 {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// Numeric value of the address
    pub fn value(&self) -> u128 {
        match self.0 {
            IpAddr::V4(v4) => u128::from(u32::from(v4)),
            IpAddr::V6(v6) => u128::from(v6),
        }
    }

    fn from_value(version: IpVersion, value: u128) -> Self {
        match version {
            // Callers only pass values masked to 32 bits for IPv4.
            IpVersion::V4 => Self(IpAddr::V4(Ipv4Addr::from(value as u32))),
            IpVersion::V6 => Self(IpAddr::V6(Ipv6Addr::from(value))),
        }
    }

    /// Full single-address reverse name, e.g. `5.0.0.10.in-addr.arpa`
    pub fn reverse_pointer(&self) -> String {
        reverse_zone_name(self, false)
    }

    /// Reverse zone at the conventional delegation boundary (/24 or /48)
    pub fn reverse_zone(&self) -> String {
        reverse_zone_name(self, true)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpAddr::from_str(s.trim())
            .map(Self)
            .map_err(|_| NetworkError::InvalidIpAddress(s.to_string()))
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self(ip)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Self(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Self(IpAddr::V6(ip))
    }
}

/// Derive the reverse-DNS name for an address
///
/// With `at_boundary` set the name of the enclosing /24 (IPv4) or /48 (IPv6)
/// zone is returned, otherwise the pointer name of the single address.
pub fn reverse_zone_name(address: &Address, at_boundary: bool) -> String {
    match address.ip() {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            let skip = usize::from(at_boundary);
            let labels: Vec<String> = octets
                .iter()
                .rev()
                .skip(skip)
                .map(|octet| octet.to_string())
                .collect();
            format!("{}.{}", labels.join("."), IPV4_REVERSE_SUFFIX)
        }
        IpAddr::V6(v6) => {
            let nibbles = format!("{:032x}", u128::from(v6));
            let skip = if at_boundary { IPV6_BOUNDARY_SKIP } else { 0 };
            let labels: Vec<String> = nibbles
                .chars()
                .rev()
                .skip(skip)
                .map(String::from)
                .collect();
            format!("{}.{}", labels.join("."), IPV6_REVERSE_SUFFIX)
        }
    }
}

/// Strip the leading label of a zone name, e.g. `0.0.10.in-addr.arpa` → `0.10.in-addr.arpa`
///
/// Returns `None` once only the reverse suffix would remain.
pub fn widen_zone_name(zone: &str) -> Option<String> {
    let (_, parent) = zone.split_once('.')?;
    if parent == IPV4_REVERSE_SUFFIX || parent == IPV6_REVERSE_SUFFIX || !parent.contains('.') {
        return None;
    }
    Some(parent.to_string())
}

/// An IP network in CIDR form with host bits cleared
///
/// # Examples
///
/// ```rust
/// use cim_ipam::domain::Network;
///
/// let net: Network = "10.0.1.0/22".parse().unwrap();
/// assert_eq!(net.to_string(), "10.0.0.0/22");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Network {
    base: Address,
    prefix_len: u8,
}

impl Network {
    /// Build a network from any address inside it, masking host bits
    pub fn new(address: impl Into<Address>, prefix_len: u8) -> Result<Self, NetworkError> {
        let address = address.into();
        let bits = address.version().bits();
        if prefix_len > bits {
            return Err(NetworkError::InvalidPrefixLength(prefix_len));
        }

        let base = Address::from_value(
            address.version(),
            address.value() & prefix_mask(address.version(), prefix_len),
        );

        Ok(Self { base, prefix_len })
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn version(&self) -> IpVersion {
        self.base.version()
    }

    fn mask(&self) -> u128 {
        prefix_mask(self.version(), self.prefix_len)
    }

    /// Number of host bits
    pub fn host_bits(&self) -> u8 {
        self.version().bits() - self.prefix_len
    }

    /// Lowest address in the network (the network address)
    pub fn first_address(&self) -> Address {
        self.base
    }

    /// Highest address in the network (the broadcast address for IPv4)
    pub fn last_address(&self) -> Address {
        let width = width_mask(self.version());
        Address::from_value(self.version(), (self.base.value() | !self.mask()) & width)
    }

    /// Total number of addresses, `None` when it does not fit in a `u128`
    pub fn num_addresses(&self) -> Option<u128> {
        1u128.checked_shl(u32::from(self.host_bits()))
    }

    pub fn contains(&self, address: &Address) -> bool {
        address.version() == self.version() && address.value() & self.mask() == self.base.value()
    }

    /// Usable host addresses of an IPv4 network
    ///
    /// Network and broadcast addresses are excluded except for /31 and /32.
    /// IPv6 networks yield nothing. Each call returns a fresh iterator.
    pub fn hosts(&self) -> Hosts {
        if self.version() != IpVersion::V4 {
            return Hosts::empty();
        }

        // Both bounds are IPv4 values, so they fit in 32 bits.
        let min = self.first_address().value() as u32;
        let max = self.last_address().value() as u32;
        let range = match self.prefix_len {
            31 | 32 => min..=max,
            _ => (min + 1)..=(max - 1),
        };

        Hosts { range }
    }
}

fn width_mask(version: IpVersion) -> u128 {
    match version {
        IpVersion::V4 => u128::from(u32::MAX),
        IpVersion::V6 => u128::MAX,
    }
}

fn prefix_mask(version: IpVersion, prefix_len: u8) -> u128 {
    let host_bits = u32::from(version.bits() - prefix_len);
    let width = width_mask(version);
    width.checked_shl(host_bits).unwrap_or(0) & width
}

/// Parse CIDR text into a normalized network
///
/// Host bits are masked rather than rejected, so `10.0.1.0/22` parses as
/// `10.0.0.0/22`. A bare address is a single-host network.
pub fn parse_network(text: &str) -> Result<Network, NetworkError> {
    let text = text.trim();
    let (addr_str, prefix) = match text.split_once('/') {
        Some((addr_str, prefix_str)) => {
            let prefix = prefix_str
                .parse::<u8>()
                .map_err(|_| NetworkError::InvalidCidr(text.to_string()))?;
            (addr_str, Some(prefix))
        }
        None => (text, None),
    };

    let address: Address = addr_str.parse()?;
    let prefix = prefix.unwrap_or_else(|| address.version().bits());
    Network::new(address, prefix)
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_network(s)
    }
}

impl TryFrom<String> for Network {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_network(&value)
    }
}

impl From<Network> for String {
    fn from(value: Network) -> Self {
        value.to_string()
    }
}

/// Lazy iterator over the usable hosts of an IPv4 network
#[derive(Debug, Clone)]
pub struct Hosts {
    range: RangeInclusive<u32>,
}

impl Hosts {
    #[allow(clippy::reversed_empty_ranges)]
    fn empty() -> Self {
        Self { range: 1..=0 }
    }
}

impl Iterator for Hosts {
    type Item = Address;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|value| Address::from(Ipv4Addr::from(value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

/// MAC Address value object
///
/// Accepts colon, hyphen, or bare hex forms; renders lowercase and
/// colon-separated.
///
/// ```rust
/// use cim_ipam::domain::MacAddress;
///
/// let mac = MacAddress::new("00-11-22-AA-BB-CC").unwrap();
/// assert_eq!(mac.as_str(), "00:11:22:aa:bb:cc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(mac: impl AsRef<str>) -> Result<Self, NetworkError> {
        let mac = mac.as_ref();
        let mac_clean = mac.replace([':', '-'], "");

        if mac_clean.len() != 12 || !mac_clean.is_ascii() {
            return Err(NetworkError::InvalidMacAddress(mac.to_string()));
        }

        let mut octets = [0u8; 6];
        for (i, chunk) in mac_clean.as_bytes().chunks(2).enumerate() {
            let hex_str = std::str::from_utf8(chunk)
                .map_err(|_| NetworkError::InvalidMacAddress(mac.to_string()))?;
            octets[i] = u8::from_str_radix(hex_str, 16)
                .map_err(|_| NetworkError::InvalidMacAddress(mac.to_string()))?;
        }

        Ok(Self(octets))
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Canonical form (lowercase, colon-separated)
    pub fn as_str(&self) -> String {
        self.0
            .iter()
            .map(|octet| format!("{:02x}", octet))
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MacAddress {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test_case("10.0.1.0/22", "10.0.0.0/22" ; "masks host bits")]
    #[test_case("192.168.1.77/24", "192.168.1.0/24" ; "class c")]
    #[test_case("10.0.0.5", "10.0.0.5/32" ; "bare ipv4")]
    #[test_case("0.0.0.0/0", "0.0.0.0/0" ; "default route")]
    #[test_case("2001:db8::1/48", "2001:db8::/48" ; "ipv6")]
    #[test_case("2001:db8::1", "2001:db8::1/128" ; "bare ipv6")]
    #[test_case(" 10.9.8.7/8 ", "10.0.0.0/8" ; "surrounding whitespace")]
    fn test_parse_normalizes(input: &str, expected: &str) {
        assert_eq!(parse_network(input).unwrap().to_string(), expected);
    }

    #[test_case("10.0.0.0/33" ; "ipv4 prefix too long")]
    #[test_case("2001:db8::/129" ; "ipv6 prefix too long")]
    #[test_case("10.0.0/24" ; "short address")]
    #[test_case("999.0.0.0/8" ; "bad octet")]
    #[test_case("10.0.0.0/" ; "empty prefix")]
    #[test_case("10.0.0.0/abc" ; "non numeric prefix")]
    #[test_case("" ; "empty")]
    fn test_parse_rejects(input: &str) {
        assert!(parse_network(input).is_err());
    }

    #[test]
    fn test_address_ordering() {
        assert!(addr("10.0.0.2") < addr("10.0.0.10"));
        assert!(addr("9.255.255.255") < addr("10.0.0.0"));
        assert!(addr("255.255.255.255") < addr("::1"));
        assert!(addr("2001:db8::2") < addr("2001:db8::10"));
    }

    #[test]
    fn test_ipv4_reverse_names() {
        let a = addr("10.0.0.5");
        assert_eq!(a.reverse_pointer(), "5.0.0.10.in-addr.arpa");
        assert_eq!(a.reverse_zone(), "0.0.10.in-addr.arpa");
    }

    #[test]
    fn test_ipv6_reverse_names() {
        let a = addr("2001:db8::1");
        assert_eq!(
            a.reverse_pointer(),
            "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
        assert_eq!(a.reverse_zone(), "0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa");
    }

    #[test_case("0.0.10.in-addr.arpa" => Some("0.10.in-addr.arpa".to_string()) ; "ipv4 /24 to /16")]
    #[test_case("10.in-addr.arpa" => None ; "ipv4 stops at suffix")]
    #[test_case("0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa" => Some("0.0.0.8.b.d.0.1.0.0.2.ip6.arpa".to_string()) ; "ipv6 /48 to /44")]
    #[test_case("arpa" => None ; "single label")]
    fn test_widen_zone_name(zone: &str) -> Option<String> {
        widen_zone_name(zone)
    }

    #[test]
    fn test_min_max_contains() {
        let net = parse_network("10.0.0.0/30").unwrap();
        assert_eq!(net.first_address(), addr("10.0.0.0"));
        assert_eq!(net.last_address(), addr("10.0.0.3"));
        assert_eq!(net.num_addresses(), Some(4));
        assert!(net.contains(&addr("10.0.0.3")));
        assert!(!net.contains(&addr("10.0.0.4")));
        assert!(!net.contains(&addr("::a00:1")));

        let v6 = parse_network("2001:db8::/64").unwrap();
        assert_eq!(v6.last_address(), addr("2001:db8::ffff:ffff:ffff:ffff"));
        assert_eq!(parse_network("::/0").unwrap().num_addresses(), None);
    }

    #[test]
    fn test_hosts_enumeration() {
        let net = parse_network("10.0.0.0/30").unwrap();
        let hosts: Vec<Address> = net.hosts().collect();
        assert_eq!(hosts, vec![addr("10.0.0.1"), addr("10.0.0.2")]);

        // restartable
        assert_eq!(net.hosts().count(), 2);
        assert_eq!(parse_network("10.0.0.0/24").unwrap().hosts().count(), 254);
    }

    #[test]
    fn test_hosts_point_to_point_and_single() {
        let p2p: Vec<Address> = parse_network("10.0.0.0/31").unwrap().hosts().collect();
        assert_eq!(p2p, vec![addr("10.0.0.0"), addr("10.0.0.1")]);

        let single: Vec<Address> = parse_network("10.0.0.9/32").unwrap().hosts().collect();
        assert_eq!(single, vec![addr("10.0.0.9")]);
    }

    #[test]
    fn test_hosts_ipv6_is_empty() {
        assert_eq!(parse_network("2001:db8::/120").unwrap().hosts().count(), 0);
    }

    #[test]
    fn test_network_serde_normalizes() {
        let net: Network = serde_json::from_str("\"10.0.1.0/22\"").unwrap();
        assert_eq!(serde_json::to_string(&net).unwrap(), "\"10.0.0.0/22\"");
    }

    #[test]
    fn test_mac_address_formats() {
        assert!(MacAddress::new("00:11:22:33:44:55").is_ok());
        assert!(MacAddress::new("00-11-22-33-44-55").is_ok());
        assert!(MacAddress::new("001122334455").is_ok());
        assert!(MacAddress::new("00:11:22:33:44").is_err());
        assert!(MacAddress::new("00:11:22:33:44:zz").is_err());
    }
}
