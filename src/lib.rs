// Copyright (c) 2025 - Cowboy AI, Inc.
//! Address management for the Composable Information Machine
//!
//! Keeps IP address assignments and DNS records consistent: forward (A/AAAA),
//! reverse (PTR), and alias (CNAME) records are derived from a single
//! address assignment and kept in step through renames and reassignments.
//!
//! - [`domain`] - addresses, networks, hosts, assignments, subnets
//! - [`dns`] - record shapes, the record store contract, the synchronizer
//! - [`store`] - transactional persistence traits and an in-memory store
//! - [`service`] - assignment lifecycle, host registry, subnet allocator
//! - [`diagnostics`] - reachability checks

pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod dns;
pub mod domain;
pub mod errors;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use aggregate::*;
pub use config::{IpamConfig, PingConfig, TelemetryConfig};
pub use dns::{DnsSynchronizer, Record, RecordStore, RecordType, SyncReport, Zone};
pub use domain::{
    parse_network, Address, AddressAssignment, AddressUsage, AssignmentId, Coordinates, Host,
    HostCount, HostId, HostType, Hostname, MacAddress, Network, OsType, Subnet, SubnetId,
    Utilization,
};
pub use errors::{IpamError, IpamResult};
pub use service::{AssignmentOutcome, AssignmentService, HostRegistry, SubnetAllocator};
pub use store::{InMemoryStore, IpamStore, IpamTransaction};
