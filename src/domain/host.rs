// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Entity
//!
//! A host is any asset on the network. It owns its name, and through the name
//! every DNS record derived from its address assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Coordinates, HostId, HostType, Hostname, MacAddress, OsType, SiteId, UserId};

/// Host Entity
///
/// # Invariants
/// - `name` satisfies the hostname grammar and is unique (case-insensitive)
/// - Renames go through the host registry so DNS follows the name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,

    pub name: Hostname,

    pub host_type: HostType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,

    /// Primary owner; changing it can revoke the editor's own access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,

    /// Users allowed to edit this host
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub admins: BTreeSet<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_mac: Option<MacAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wlan_mac: Option<MacAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Host {
    /// Builder for fluent construction; time is passed in, never read here
    pub fn builder(name: Hostname, host_type: HostType, now: DateTime<Utc>) -> HostBuilder {
        HostBuilder::new(name, host_type, now)
    }

    /// `{name}.{root_domain}`, lowercased for use in DNS
    pub fn fqdn(&self, root_domain: &str) -> String {
        self.name.qualify(root_domain).to_ascii_lowercase()
    }

    /// Whether `user` may edit this host
    pub fn is_admin(&self, user: &UserId) -> bool {
        self.owner.as_ref() == Some(user) || self.admins.contains(user)
    }
}

/// Builder for [`Host`]
#[derive(Debug, Clone)]
pub struct HostBuilder {
    host: Host,
}

impl HostBuilder {
    pub fn new(name: Hostname, host_type: HostType, now: DateTime<Utc>) -> Self {
        Self {
            host: Host {
                id: HostId::new(),
                name,
                host_type,
                os: None,
                site_id: None,
                owner: None,
                admins: BTreeSet::new(),
                eth_mac: None,
                wlan_mac: None,
                coordinates: None,
                notes: String::new(),
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn id(mut self, id: HostId) -> Self {
        self.host.id = id;
        self
    }

    pub fn os(mut self, os: OsType) -> Self {
        self.host.os = Some(os);
        self
    }

    pub fn site(mut self, site_id: SiteId) -> Self {
        self.host.site_id = Some(site_id);
        self
    }

    pub fn owner(mut self, owner: UserId) -> Self {
        self.host.owner = Some(owner);
        self
    }

    pub fn admin(mut self, admin: UserId) -> Self {
        self.host.admins.insert(admin);
        self
    }

    pub fn eth_mac(mut self, mac: MacAddress) -> Self {
        self.host.eth_mac = Some(mac);
        self
    }

    pub fn wlan_mac(mut self, mac: MacAddress) -> Self {
        self.host.wlan_mac = Some(mac);
        self
    }

    pub fn coordinates(mut self, coordinates: Coordinates) -> Self {
        self.host.coordinates = Some(coordinates);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.host.notes = notes.into();
        self
    }

    pub fn build(self) -> Host {
        self.host
    }
}
