// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname Value Object with DNS Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hostname validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("Hostname is empty")]
    Empty,

    #[error("Hostname exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in hostname: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),
}

/// Host name or interface label
///
/// Dot-separated labels following RFC 1123:
/// - Total length ≤ 253 characters
/// - Each label 1..=63 characters
/// - Labels contain only ASCII alphanumerics and hyphens
/// - Labels cannot start or end with hyphens
///
/// The original case is kept for display; DNS names derived from a hostname
/// are always lowercased and comparisons go through [`Hostname::eq_ignore_case`].
///
/// # Examples
///
/// ```rust
/// use cim_ipam::domain::Hostname;
///
/// let host = Hostname::new("core-rtr1").unwrap();
/// assert_eq!(host.as_str(), "core-rtr1");
///
/// assert!(Hostname::new("").is_err());
/// assert!(Hostname::new("-invalid").is_err());
/// assert!(Hostname::new("invalid-.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Maximum total length for FQDN (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Create a new hostname with validation
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let hostname = hostname.into();

        if hostname.is_empty() {
            return Err(HostnameError::Empty);
        }

        if hostname.len() > Self::MAX_LENGTH {
            return Err(HostnameError::TooLong(hostname.len()));
        }

        for label in hostname.split('.') {
            Self::validate_label(label)?;
        }

        Ok(Self(hostname))
    }

    fn validate_label(label: &str) -> Result<(), HostnameError> {
        if label.is_empty() {
            return Err(HostnameError::Empty);
        }

        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(HostnameError::LabelTooLong(label.to_string()));
        }

        if let Some(ch) = label
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
        {
            return Err(HostnameError::InvalidCharacter(ch));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(HostnameError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    /// Get the hostname as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get labels as a vector
    pub fn labels(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// Convert to lowercase (canonical DNS form)
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.to_ascii_lowercase())
    }

    /// Case-insensitive comparison, the way DNS compares names
    pub fn eq_ignore_case(&self, other: &Hostname) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Append a parent domain, e.g. `web01` + `example.com` = `web01.example.com`
    pub fn qualify(&self, domain: &str) -> String {
        format!("{}.{}", self.0, domain)
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Hostname {
    type Error = HostnameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.0
    }
}
