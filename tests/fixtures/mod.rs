// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-ipam
//!
//! Deterministic timestamps and correlation ids, plus a harness wiring every
//! service to one shared in-memory store.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use cim_ipam::dns::{Record, RecordType};
use cim_ipam::{
    AssignmentService, CreateAssignmentCommand, DnsSynchronizer, Host, HostId, HostRegistry,
    HostType, Hostname, InMemoryStore, RegisterHostCommand, SubnetAllocator,
};

pub const ROOT_DOMAIN: &str = "example.com";

pub const CORRELATION_ID_1: &str = "01934f4a-c001-7000-8000-00000000c001";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn correlation_id() -> Uuid {
    Uuid::parse_str(CORRELATION_ID_1).expect("Invalid UUID in test fixture")
}

pub fn hostname(name: &str) -> Hostname {
    Hostname::new(name).expect("Invalid hostname in test fixture")
}

/// Every service over one store
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub hosts: HostRegistry<InMemoryStore>,
    pub assignments: AssignmentService<InMemoryStore>,
    pub subnets: SubnetAllocator<InMemoryStore>,
}

impl Harness {
    /// Harness whose store knows the given zones
    pub fn with_zones(zones: &[&str]) -> Self {
        let store = Arc::new(InMemoryStore::with_zones(zones.iter().copied()));
        let dns = DnsSynchronizer::new(ROOT_DOMAIN);
        Self {
            hosts: HostRegistry::new(Arc::clone(&store), dns.clone()),
            assignments: AssignmentService::new(Arc::clone(&store), dns),
            subnets: SubnetAllocator::new(Arc::clone(&store)),
            store,
        }
    }

    /// Root zone plus the /24 reverse zone for 10.0.0.0/24
    pub fn standard() -> Self {
        Self::with_zones(&[ROOT_DOMAIN, "0.0.10.in-addr.arpa"])
    }

    pub async fn register(&self, name: &str) -> Host {
        self.hosts
            .register(RegisterHostCommand {
                name: hostname(name),
                host_type: HostType::Server,
                details: Default::default(),
                timestamp: fixed_timestamp(),
                correlation_id: correlation_id(),
            })
            .await
            .expect("host registration failed")
    }

    pub fn assign(&self, host_id: HostId, address: &str) -> CreateAssignmentCommand {
        CreateAssignmentCommand::new(
            host_id,
            address.parse().expect("Invalid address in test fixture"),
            fixed_timestamp(),
        )
    }

    /// Committed records as sorted `(name, type, content)` triples
    pub async fn record_triples(&self) -> Vec<Triple> {
        sorted(
            self.store
                .records()
                .await
                .into_iter()
                .map(|r: Record| (r.name, r.record_type, r.content))
                .collect(),
        )
    }
}

pub type Triple = (String, RecordType, String);

/// Order triples by name, type, then content
pub fn sorted(mut triples: Vec<Triple>) -> Vec<Triple> {
    triples.sort_by(|a, b| (&a.0, a.1.as_str(), &a.2).cmp(&(&b.0, b.1.as_str(), &b.2)));
    triples
}

pub fn triple(name: &str, record_type: RecordType, content: &str) -> Triple {
    (name.to_string(), record_type, content.to_string())
}
