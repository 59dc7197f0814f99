// Copyright (c) 2025 - Cowboy AI, Inc.
//! Address Assignment Entity
//!
//! The single source of truth for one address on one host. Every forward,
//! reverse, and alias record the synchronizer manages is derived from it.
//!
//! Assignments are immutable: an update is a delete of the old incarnation
//! followed by an insert of the new one under the same [`AssignmentId`].

use serde::{Deserialize, Serialize};

use super::{Address, AssignmentId, HostId, Hostname};

/// An address assigned to a host, optionally on a named interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressAssignment {
    pub id: AssignmentId,

    pub host_id: HostId,

    /// Interface label, becomes a subdomain of the host name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<Hostname>,

    /// Unique across all assignments
    pub address: Address,

    /// Manage DNS records for this assignment automatically
    #[serde(default = "default_auto_dns")]
    pub auto_dns: bool,

    /// Point a CNAME at the bare host name to this interface
    #[serde(default)]
    pub primary: bool,
}

fn default_auto_dns() -> bool {
    true
}

impl AddressAssignment {
    /// New assignment with `auto_dns` on and `primary` off
    pub fn new(host_id: HostId, address: Address) -> Self {
        Self {
            id: AssignmentId::new(),
            host_id,
            interface: None,
            address,
            auto_dns: true,
            primary: false,
        }
    }

    pub fn with_interface(mut self, interface: Option<Hostname>) -> Self {
        self.interface = interface;
        self
    }

    pub fn with_auto_dns(mut self, auto_dns: bool) -> Self {
        self.auto_dns = auto_dns;
        self
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// `{interface.}{host}.{root_domain}`, lowercased
    pub fn fqdn(&self, host_name: &Hostname, root_domain: &str) -> String {
        let host_fqdn = host_name.qualify(root_domain);
        let fqdn = match &self.interface {
            Some(interface) => interface.qualify(&host_fqdn),
            None => host_fqdn,
        };
        fqdn.to_ascii_lowercase()
    }

    /// Whether this assignment should own a CNAME at the bare host name
    pub fn wants_cname(&self) -> bool {
        self.primary && self.interface.is_some()
    }
}
