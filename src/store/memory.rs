// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Store
//!
//! A complete [`IpamStore`] kept in process memory. Used by tests and batch
//! tooling, and as the reference for what a persistent implementation must
//! guarantee.
//!
//! A transaction holds the store's async mutex for its whole life and works
//! on a private copy of the state; `commit` swaps the copy in, anything else
//! throws it away. Writers are therefore serialized and partial effects are
//! never visible.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, trace};
use uuid::Uuid;

use super::{AssignmentStore, HostStore, IpamStore, IpamTransaction, SubnetStore};
use crate::dns::{Record, RecordDefaults, RecordFilter, RecordLookup, RecordStore, RecordType, Zone};
use crate::domain::{
    Address, AddressAssignment, AssignmentId, Host, HostId, Hostname, Network, Subnet, SubnetId,
};
use crate::errors::{IpamError, IpamResult};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    hosts: HashMap<HostId, Host>,
    assignments: HashMap<AssignmentId, AddressAssignment>,
    subnets: HashMap<SubnetId, Subnet>,
    /// Keyed by lowercased zone name
    zones: BTreeMap<String, Zone>,
    records: Vec<Record>,
}

impl MemoryState {
    fn find_zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(&name.to_ascii_lowercase())
    }

    fn sorted(mut assignments: Vec<AddressAssignment>) -> Vec<AddressAssignment> {
        assignments.sort_by_key(|a| a.address);
        assignments
    }
}

/// Shared in-memory store; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given zones
    pub fn with_zones<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = MemoryState::default();
        for zone in zones {
            let zone = Zone::new(zone);
            state.zones.insert(zone.name.to_ascii_lowercase(), zone);
        }
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn add_zone(&self, name: impl Into<String>) {
        let zone = Zone::new(name);
        let mut state = self.state.lock().await;
        state.zones.insert(zone.name.to_ascii_lowercase(), zone);
    }

    /// Insert a record directly, outside of any synchronization
    pub async fn add_record(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
        content: &str,
    ) -> IpamResult<Record> {
        let mut state = self.state.lock().await;
        let zone = state
            .find_zone(zone)
            .ok_or_else(|| IpamError::ZoneNotFound(zone.to_string()))?
            .name
            .clone();
        let record = Record {
            id: Uuid::now_v7(),
            zone,
            name: name.to_string(),
            record_type,
            content: content.to_string(),
            auth: true,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    /// Snapshot of every committed record
    pub async fn records(&self) -> Vec<Record> {
        self.state.lock().await.records.clone()
    }

    /// Committed records whose name matches case-insensitively
    pub async fn records_named(&self, name: &str) -> Vec<Record> {
        self.state
            .lock()
            .await
            .records
            .iter()
            .filter(|r| r.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect()
    }

    /// Snapshot of every committed assignment, ordered by address
    pub async fn assignments(&self) -> Vec<AddressAssignment> {
        let state = self.state.lock().await;
        MemoryState::sorted(state.assignments.values().cloned().collect())
    }

    /// Snapshot of every committed host
    pub async fn hosts(&self) -> Vec<Host> {
        self.state.lock().await.hosts.values().cloned().collect()
    }
}

#[async_trait]
impl IpamStore for InMemoryStore {
    type Transaction = MemoryTransaction;

    async fn begin(&self) -> IpamResult<Self::Transaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        trace!("transaction started");
        Ok(MemoryTransaction { guard, working })
    }
}

/// Transaction over an [`InMemoryStore`]
#[derive(Debug)]
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl IpamTransaction for MemoryTransaction {
    async fn commit(mut self) -> IpamResult<()> {
        *self.guard = self.working;
        trace!("transaction committed");
        Ok(())
    }

    async fn rollback(self) -> IpamResult<()> {
        trace!("transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl AssignmentStore for MemoryTransaction {
    async fn get_assignment(&self, id: AssignmentId) -> IpamResult<Option<AddressAssignment>> {
        Ok(self.working.assignments.get(&id).cloned())
    }

    async fn assignments_for_host(&self, host_id: HostId) -> IpamResult<Vec<AddressAssignment>> {
        let owned = self
            .working
            .assignments
            .values()
            .filter(|a| a.host_id == host_id)
            .cloned()
            .collect();
        Ok(MemoryState::sorted(owned))
    }

    async fn assignments_in_range(
        &self,
        min: Address,
        max: Address,
    ) -> IpamResult<Vec<AddressAssignment>> {
        let in_range = self
            .working
            .assignments
            .values()
            .filter(|a| a.address >= min && a.address <= max)
            .cloned()
            .collect();
        Ok(MemoryState::sorted(in_range))
    }

    async fn insert_assignment(&mut self, assignment: AddressAssignment) -> IpamResult<()> {
        if self
            .working
            .assignments
            .values()
            .any(|a| a.address == assignment.address)
        {
            return Err(IpamError::DuplicateAddress(assignment.address.to_string()));
        }
        if self.working.assignments.contains_key(&assignment.id) {
            return Err(IpamError::TransactionFailed(format!(
                "assignment {} already exists",
                assignment.id
            )));
        }

        self.working.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    async fn delete_assignment(
        &mut self,
        id: AssignmentId,
    ) -> IpamResult<Option<AddressAssignment>> {
        Ok(self.working.assignments.remove(&id))
    }
}

#[async_trait]
impl HostStore for MemoryTransaction {
    async fn get_host(&self, id: HostId) -> IpamResult<Option<Host>> {
        Ok(self.working.hosts.get(&id).cloned())
    }

    async fn find_host_by_name(&self, name: &Hostname) -> IpamResult<Option<Host>> {
        Ok(self
            .working
            .hosts
            .values()
            .find(|h| h.name.eq_ignore_case(name))
            .cloned())
    }

    async fn save_host(&mut self, host: Host) -> IpamResult<()> {
        if self
            .working
            .hosts
            .values()
            .any(|h| h.id != host.id && h.name.eq_ignore_case(&host.name))
        {
            return Err(IpamError::DuplicateHostname(host.name.to_string()));
        }

        self.working.hosts.insert(host.id, host);
        Ok(())
    }

    async fn delete_host(&mut self, id: HostId) -> IpamResult<Option<Host>> {
        Ok(self.working.hosts.remove(&id))
    }
}

#[async_trait]
impl SubnetStore for MemoryTransaction {
    async fn get_subnet(&self, id: SubnetId) -> IpamResult<Option<Subnet>> {
        Ok(self.working.subnets.get(&id).cloned())
    }

    async fn find_subnet(&self, network: &Network) -> IpamResult<Option<Subnet>> {
        Ok(self
            .working
            .subnets
            .values()
            .find(|s| s.network == *network)
            .cloned())
    }

    async fn insert_subnet(&mut self, subnet: Subnet) -> IpamResult<()> {
        if self
            .working
            .subnets
            .values()
            .any(|s| s.network == subnet.network)
        {
            return Err(IpamError::DuplicateSubnet(subnet.network.to_string()));
        }

        self.working.subnets.insert(subnet.id, subnet);
        Ok(())
    }

    async fn delete_subnet(&mut self, id: SubnetId) -> IpamResult<Option<Subnet>> {
        Ok(self.working.subnets.remove(&id))
    }
}

#[async_trait]
impl RecordStore for MemoryTransaction {
    async fn find_zone(&self, name: &str) -> IpamResult<Option<Zone>> {
        Ok(self.working.find_zone(name).cloned())
    }

    async fn get_or_create(
        &mut self,
        lookup: RecordLookup,
        defaults: RecordDefaults,
    ) -> IpamResult<(Record, bool)> {
        let zone = self
            .working
            .find_zone(&lookup.zone)
            .ok_or_else(|| IpamError::ZoneNotFound(lookup.zone.clone()))?
            .name
            .clone();

        let existing = self.working.records.iter().find(|r| {
            r.zone.eq_ignore_ascii_case(&zone)
                && r.name.eq_ignore_ascii_case(&lookup.name)
                && r.record_type == lookup.record_type
                && lookup.content.as_ref().map_or(true, |c| r.content == *c)
        });
        if let Some(record) = existing {
            return Ok((record.clone(), false));
        }

        let content = lookup.content.or(defaults.content).unwrap_or_default();

        // A forward address may only be published under one name.
        if lookup.record_type.is_forward() {
            if let Some(clash) = self
                .working
                .records
                .iter()
                .find(|r| r.record_type == lookup.record_type && r.content == content)
            {
                return Err(IpamError::DuplicateRecord {
                    name: clash.name.clone(),
                    record_type: clash.record_type.to_string(),
                    content,
                });
            }
        }

        let record = Record {
            id: Uuid::now_v7(),
            zone,
            name: lookup.name,
            record_type: lookup.record_type,
            content,
            auth: defaults.auth,
        };
        self.working.records.push(record.clone());
        Ok((record, true))
    }

    async fn set_content(&mut self, id: Uuid, content: &str) -> IpamResult<Record> {
        let record = self
            .working
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| IpamError::TransactionFailed(format!("record {} not found", id)))?;
        record.content = content.to_string();
        Ok(record.clone())
    }

    async fn delete_where(&mut self, filter: &RecordFilter) -> IpamResult<usize> {
        let before = self.working.records.len();
        self.working.records.retain(|r| !filter.matches(r));
        let removed = before - self.working.records.len();
        if removed > 0 {
            debug!(name = %filter.name, removed, "deleted records");
        }
        Ok(removed)
    }
}
