// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for IPAM and DNS reconciliation operations

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{HostnameError, NetworkError, ValidationError};

/// Errors that can occur in IPAM operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IpamError {
    /// CIDR text could not be parsed into a network
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Host name or interface label violates the hostname grammar
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] HostnameError),

    /// MAC address text could not be parsed
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// Address is already assigned to another interface
    #[error("Address {0} is already assigned")]
    DuplicateAddress(String),

    /// Host name is already taken by another host
    #[error("Hostname {0} is already registered")]
    DuplicateHostname(String),

    /// Network is already allocated as a subnet
    #[error("Subnet {0} is already allocated")]
    DuplicateSubnet(String),

    /// Record store refused a record that would collide with an existing one
    #[error("{record_type} record with content {content} already exists at {name}")]
    DuplicateRecord {
        name: String,
        record_type: String,
        content: String,
    },

    /// DNS zone does not exist in the record store
    #[error("DNS zone not found: {0}")]
    ZoneNotFound(String),

    /// Store-level failure inside an atomic operation
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Host does not exist
    #[error("Host not found: {0}")]
    HostNotFound(Uuid),

    /// Address assignment does not exist
    #[error("Address assignment not found: {0}")]
    AssignmentNotFound(Uuid),

    /// Subnet does not exist
    #[error("Subnet not found: {0}")]
    SubnetNotFound(String),

    /// Domain invariant violated
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation needs to enumerate an address family that is too large
    #[error("Cannot enumerate hosts of IPv6 network {0}")]
    AddressFamilyNotEnumerable(String),

    /// Network too large to probe address by address
    #[error("Network {network} has {count} addresses, limit is {limit}")]
    TooManyTargets {
        network: String,
        count: u128,
        limit: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for IPAM operations
pub type IpamResult<T> = Result<T, IpamError>;

impl From<NetworkError> for IpamError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::InvalidMacAddress(mac) => IpamError::InvalidMacAddress(mac),
            other => IpamError::InvalidNetwork(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for IpamError {
    fn from(err: serde_json::Error) -> Self {
        IpamError::Configuration(err.to_string())
    }
}
