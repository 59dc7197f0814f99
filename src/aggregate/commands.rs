// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Commands
//!
//! Commands express user intent and can be rejected by the services.
//! Cascades (rename, replace, delete) are explicit commands rather than
//! save hooks.
//!
//! # Time Handling
//!
//! All commands include an explicit `timestamp`. Services never call
//! `Utc::now()`; time is passed in from the caller.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::{
    Address, AssignmentId, Coordinates, HostId, HostType, Hostname, MacAddress, OsType, SiteId,
    UserId,
};

/// Command to give a host a new address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssignmentCommand {
    pub host_id: HostId,

    /// Optional interface label prefixed to the host FQDN
    pub interface: Option<Hostname>,

    pub address: Address,

    /// Synchronize DNS for this address
    pub auto_dns: bool,

    /// Alias the bare host name to this assignment
    pub primary: bool,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

impl CreateAssignmentCommand {
    /// Command with `auto_dns` on, not primary, no interface
    pub fn new(host_id: HostId, address: Address, timestamp: DateTime<Utc>) -> Self {
        Self {
            host_id,
            interface: None,
            address,
            auto_dns: true,
            primary: false,
            timestamp,
            correlation_id: Uuid::now_v7(),
        }
    }

    pub fn interface(mut self, interface: Hostname) -> Self {
        self.interface = Some(interface);
        self
    }

    pub fn auto_dns(mut self, auto_dns: bool) -> Self {
        self.auto_dns = auto_dns;
        self
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

/// Field changes applied when replacing an assignment
///
/// `None` keeps the current value. The interface is doubly optional so that
/// it can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentChanges {
    pub host_id: Option<HostId>,
    pub interface: Option<Option<Hostname>>,
    pub address: Option<Address>,
    pub auto_dns: Option<bool>,
    pub primary: Option<bool>,
}

/// Command to replace an assignment with a new incarnation under the same id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAssignmentCommand {
    pub assignment_id: AssignmentId,

    pub changes: AssignmentChanges,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Command to delete an assignment and its DNS records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAssignmentCommand {
    pub assignment_id: AssignmentId,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Command to register a new host
///
/// Optional attributes are set afterwards through
/// [`UpdateHostDetailsCommand`] or carried in `details`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterHostCommand {
    pub name: Hostname,

    pub host_type: HostType,

    pub details: HostDetails,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

impl RegisterHostCommand {
    pub fn new(name: Hostname, host_type: HostType, timestamp: DateTime<Utc>) -> Self {
        Self {
            name,
            host_type,
            details: HostDetails::default(),
            timestamp,
            correlation_id: Uuid::now_v7(),
        }
    }

    pub fn details(mut self, details: HostDetails) -> Self {
        self.details = details;
        self
    }
}

/// Command to rename a host and cascade the change into DNS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameHostCommand {
    pub host_id: HostId,

    pub new_name: Hostname,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Host attributes without DNS impact
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostDetails {
    pub os: Option<OsType>,
    pub site_id: Option<SiteId>,
    pub owner: Option<UserId>,
    pub admins: BTreeSet<UserId>,
    pub coordinates: Option<Coordinates>,
    pub eth_mac: Option<MacAddress>,
    pub wlan_mac: Option<MacAddress>,
    pub notes: String,
}

/// Command to overwrite a host's non-DNS attributes
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHostDetailsCommand {
    pub host_id: HostId,

    /// New type; `None` keeps the current one
    pub host_type: Option<HostType>,

    /// Replaces every detail field
    pub details: HostDetails,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Command to delete a host and every assignment it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteHostCommand {
    pub host_id: HostId,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

/// Command to allocate a subnet from CIDR text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocateSubnetCommand {
    /// CIDR text; normalized before storing
    pub network: String,

    pub owner: Option<UserId>,

    pub notes: String,

    pub timestamp: DateTime<Utc>,

    /// Correlation ID for distributed tracing
    pub correlation_id: Uuid,
}

impl AllocateSubnetCommand {
    pub fn new(network: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            network: network.into(),
            owner: None,
            notes: String::new(),
            timestamp,
            correlation_id: Uuid::now_v7(),
        }
    }
}
