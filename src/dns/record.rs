// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS zone and record shapes written by the reconciliation core

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::IpVersion;

/// Record types managed by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Ptr,
    Cname,
}

impl RecordType {
    /// Forward record type for an address family
    pub fn forward(version: IpVersion) -> Self {
        match version {
            IpVersion::V4 => RecordType::A,
            IpVersion::V6 => RecordType::Aaaa,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, RecordType::A | RecordType::Aaaa)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Ptr => "PTR",
            RecordType::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A DNS zone known to the record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A stored DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
    pub content: String,
    /// Authoritative data for the zone
    pub auth: bool,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_type, self.content)
    }
}

/// Key used by get-or-create
///
/// `content` takes part in the key only when set; forward records are keyed
/// on it, PTR and CNAME records are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLookup {
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
    pub content: Option<String>,
}

/// Attributes applied only when get-or-create inserts a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefaults {
    pub content: Option<String>,
    pub auth: bool,
}

impl RecordDefaults {
    pub fn authoritative() -> Self {
        Self {
            content: None,
            auth: true,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// How a delete filter compares record content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMatch {
    Exact(String),
    IgnoreCase(String),
}

impl ContentMatch {
    fn matches(&self, content: &str) -> bool {
        match self {
            ContentMatch::Exact(expected) => content == expected,
            ContentMatch::IgnoreCase(expected) => content.eq_ignore_ascii_case(expected),
        }
    }
}

/// Selection for delete-where; the name always compares case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub name: String,
    pub types: Vec<RecordType>,
    pub content: Option<ContentMatch>,
}

impl RecordFilter {
    pub fn new(name: impl Into<String>, types: impl IntoIterator<Item = RecordType>) -> Self {
        Self {
            name: name.into(),
            types: types.into_iter().collect(),
            content: None,
        }
    }

    pub fn content(mut self, content: ContentMatch) -> Self {
        self.content = Some(content);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.name.eq_ignore_ascii_case(&self.name)
            && self.types.contains(&record.record_type)
            && self
                .content
                .as_ref()
                .map_or(true, |content| content.matches(&record.content))
    }
}
