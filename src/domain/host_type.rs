// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host and Operating System Taxonomy
//!
//! The fixed vocabulary used to classify hosts on the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unknown taxonomy value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownTagError {
    pub kind: &'static str,
    pub value: String,
}

/// What kind of asset a host is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    /// Wireless sector antenna
    Sector,
    /// Point-to-point link radio
    Ptp,
    EdgeRouter,
    CellRouter,
    Client,
    Server,
    /// Virtual machine
    Vm,
    Container,
    /// Anycast service address
    Anycast,
    /// Power distribution unit
    Pdu,
    /// KVM/iLO/DRAC out-of-band console
    Kvm,
    Other,
}

impl HostType {
    /// All host types in display order
    pub const ALL: [HostType; 12] = [
        Self::Sector,
        Self::Ptp,
        Self::EdgeRouter,
        Self::CellRouter,
        Self::Client,
        Self::Server,
        Self::Vm,
        Self::Container,
        Self::Anycast,
        Self::Pdu,
        Self::Kvm,
        Self::Other,
    ];

    /// Canonical stored tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sector => "sector",
            Self::Ptp => "ptp",
            Self::EdgeRouter => "edgerouter",
            Self::CellRouter => "cellrouter",
            Self::Client => "client",
            Self::Server => "server",
            Self::Vm => "vm",
            Self::Container => "container",
            Self::Anycast => "anycast",
            Self::Pdu => "pdu",
            Self::Kvm => "kvm",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sector => "Sector",
            Self::Ptp => "PtP",
            Self::EdgeRouter => "Edge Router",
            Self::CellRouter => "Cell Router",
            Self::Client => "Client",
            Self::Server => "Server",
            Self::Vm => "Virtual Machine",
            Self::Container => "Container",
            Self::Anycast => "Anycast service",
            Self::Pdu => "PDU",
            Self::Kvm => "KVM/iLO/DRAC",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HostType {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTagError {
                kind: "host type",
                value: s.to_string(),
            })
    }
}

/// Operating system running on a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    RouterOs,
    AirOs,
    Linux,
    Esxi,
    Windows,
    Ilo,
    Other,
}

impl OsType {
    pub const ALL: [OsType; 7] = [
        Self::RouterOs,
        Self::AirOs,
        Self::Linux,
        Self::Esxi,
        Self::Windows,
        Self::Ilo,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RouterOs => "routeros",
            Self::AirOs => "airos",
            Self::Linux => "linux",
            Self::Esxi => "esxi",
            Self::Windows => "windows",
            Self::Ilo => "ilo",
            Self::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RouterOs => "RouterOS",
            Self::AirOs => "AirOS",
            Self::Linux => "Linux",
            Self::Esxi => "ESXi",
            Self::Windows => "Windows",
            Self::Ilo => "iLO",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OsType {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTagError {
                kind: "operating system",
                value: s.to_string(),
            })
    }
}
