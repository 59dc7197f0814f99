// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Domain Models
//!
//! Value objects and entities for address management. Everything here is
//! pure data plus validation; persistence and DNS side effects live in
//! [`crate::store`], [`crate::dns`], and [`crate::service`].
//!
//! # Value Objects with Invariants
//!
//! - [`Hostname`] - DNS-validated host names and interface labels (RFC 1123)
//! - [`Address`] / [`Network`] - IPv4/IPv6 addresses and normalized CIDR networks
//! - [`MacAddress`] - 48-bit MAC address validation
//! - [`HostType`] / [`OsType`] - asset taxonomy
//! - [`Coordinates`] - bounded latitude/longitude
//!
//! # Entities
//!
//! - [`Host`] - owns a name and its address assignments
//! - [`AddressAssignment`] - one address, the source of its DNS records
//! - [`Subnet`] - an allocated network
//! - [`Site`] - reference data for host placement

pub mod assignment;
pub mod host;
pub mod host_type;
pub mod hostname;
pub mod ids;
pub mod invariants;
pub mod network;
pub mod site;
pub mod subnet;

pub use assignment::AddressAssignment;
pub use host::{Host, HostBuilder};
pub use host_type::{HostType, OsType, UnknownTagError};
pub use hostname::{Hostname, HostnameError};
pub use ids::{AssignmentId, HostId, SiteId, SubnetId, UserId};
pub use invariants::{ValidationError, ValidationResult};
pub use network::{
    parse_network, reverse_zone_name, widen_zone_name, Address, Hosts, IpVersion, MacAddress,
    Network, NetworkError,
};
pub use site::{Coordinates, Site};
pub use subnet::{AddressUsage, HostCount, Subnet, Utilization};
