// Copyright (c) 2025 - Cowboy AI, Inc.
//! Address Assignment Lifecycle
//!
//! An assignment is treated as immutable: any update deletes the old
//! incarnation and inserts a new one under the same id, running the full
//! remove-then-add DNS synchronization in between.
//!
//! # Transaction Semantics
//!
//! Each mutating method is one transaction:
//! 1. Load the current assignment and its host
//! 2. Remove stale DNS records
//! 3. Persist the change
//! 4. Add DNS records for the new state
//!
//! If any step fails, nothing is committed.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::finish;
use crate::aggregate::{
    AssignmentChanges, CreateAssignmentCommand, DeleteAssignmentCommand, ReplaceAssignmentCommand,
};
use crate::dns::{DnsSynchronizer, SyncReport};
use crate::domain::{AddressAssignment, AssignmentId, Host, HostId};
use crate::errors::{IpamError, IpamResult};
use crate::store::{AssignmentStore, HostStore, IpamStore, IpamTransaction};

/// Result of a create or replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    pub assignment: AddressAssignment,
    /// `None` when `auto_dns` is off
    pub dns: Option<SyncReport>,
}

/// Create, replace, and delete address assignments
#[derive(Debug)]
pub struct AssignmentService<S> {
    store: Arc<S>,
    dns: DnsSynchronizer,
}

impl<S> Clone for AssignmentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            dns: self.dns.clone(),
        }
    }
}

impl<S: IpamStore> AssignmentService<S> {
    pub fn new(store: Arc<S>, dns: DnsSynchronizer) -> Self {
        Self { store, dns }
    }

    pub fn synchronizer(&self) -> &DnsSynchronizer {
        &self.dns
    }

    /// Give a host a new address
    ///
    /// # Errors
    ///
    /// - `HostNotFound` if the host does not exist
    /// - `DuplicateAddress` if the address is already assigned
    /// - any forward-record failure from the synchronizer
    #[instrument(skip(self, command), fields(
        host = %command.host_id,
        address = %command.address,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn create(&self, command: CreateAssignmentCommand) -> IpamResult<AssignmentOutcome> {
        let mut tx = self.store.begin().await?;
        let result = self.create_in(&mut tx, command).await;
        let outcome = finish(tx, result).await?;
        info!(assignment = %outcome.assignment.id, "assignment created");
        Ok(outcome)
    }

    async fn create_in(
        &self,
        tx: &mut S::Transaction,
        command: CreateAssignmentCommand,
    ) -> IpamResult<AssignmentOutcome> {
        let host = load_host(&*tx, command.host_id).await?;
        let assignment = AddressAssignment::new(command.host_id, command.address)
            .with_interface(command.interface)
            .with_auto_dns(command.auto_dns)
            .with_primary(command.primary);

        tx.insert_assignment(assignment.clone()).await?;

        let dns = if assignment.auto_dns {
            Some(self.dns.add_records(tx, &assignment, &host.name, None).await?)
        } else {
            None
        };

        Ok(AssignmentOutcome { assignment, dns })
    }

    /// Replace an assignment with a new incarnation under the same id
    ///
    /// # Errors
    ///
    /// - `AssignmentNotFound` if the assignment does not exist
    /// - `HostNotFound` if the old or new owner does not exist
    /// - `DuplicateAddress` if the new address is held by another assignment
    #[instrument(skip(self, command), fields(
        assignment = %command.assignment_id,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn replace(
        &self,
        command: ReplaceAssignmentCommand,
    ) -> IpamResult<AssignmentOutcome> {
        let mut tx = self.store.begin().await?;
        let result = self.replace_in(&mut tx, command).await;
        let outcome = finish(tx, result).await?;
        info!(address = %outcome.assignment.address, "assignment replaced");
        Ok(outcome)
    }

    async fn replace_in(
        &self,
        tx: &mut S::Transaction,
        command: ReplaceAssignmentCommand,
    ) -> IpamResult<AssignmentOutcome> {
        let old = load_assignment(&*tx, command.assignment_id).await?;
        let old_host = load_host(&*tx, old.host_id).await?;

        let mut removed = 0;
        if old.auto_dns {
            removed = self.dns.remove_records(tx, &old, &old_host.name).await?;
        }
        tx.delete_assignment(old.id).await?;

        let new = apply_changes(&old, command.changes);
        let new_host = if new.host_id == old_host.id {
            old_host.clone()
        } else {
            load_host(&*tx, new.host_id).await?
        };

        tx.insert_assignment(new.clone()).await?;

        let dns = if new.auto_dns {
            let previous = old.auto_dns.then_some((&old, &old_host.name));
            let mut report = self
                .dns
                .add_records(tx, &new, &new_host.name, previous)
                .await?;
            report.removed += removed;
            Some(report)
        } else {
            debug!(removed, "auto DNS off for new incarnation");
            None
        };

        Ok(AssignmentOutcome {
            assignment: new,
            dns,
        })
    }

    /// Delete an assignment and the DNS records it produced
    ///
    /// Returns the number of records removed.
    #[instrument(skip(self, command), fields(
        assignment = %command.assignment_id,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn delete(&self, command: DeleteAssignmentCommand) -> IpamResult<usize> {
        let mut tx = self.store.begin().await?;
        let result = self.delete_in(&mut tx, command.assignment_id).await;
        let removed = finish(tx, result).await?;
        info!(removed, "assignment deleted");
        Ok(removed)
    }

    async fn delete_in(&self, tx: &mut S::Transaction, id: AssignmentId) -> IpamResult<usize> {
        let assignment = load_assignment(&*tx, id).await?;

        let mut removed = 0;
        if assignment.auto_dns {
            let host = load_host(&*tx, assignment.host_id).await?;
            removed = self.dns.remove_records(tx, &assignment, &host.name).await?;
        }
        tx.delete_assignment(id).await?;

        Ok(removed)
    }

    pub async fn get(&self, id: AssignmentId) -> IpamResult<AddressAssignment> {
        let tx = self.store.begin().await?;
        let result = load_assignment(&tx, id).await;
        tx.rollback().await?;
        result
    }

    /// Every assignment owned by a host, ordered by address
    pub async fn list_for_host(&self, host_id: HostId) -> IpamResult<Vec<AddressAssignment>> {
        let tx = self.store.begin().await?;
        let result = tx.assignments_for_host(host_id).await;
        tx.rollback().await?;
        result
    }
}

fn apply_changes(old: &AddressAssignment, changes: AssignmentChanges) -> AddressAssignment {
    AddressAssignment {
        id: old.id,
        host_id: changes.host_id.unwrap_or(old.host_id),
        interface: changes.interface.unwrap_or_else(|| old.interface.clone()),
        address: changes.address.unwrap_or(old.address),
        auto_dns: changes.auto_dns.unwrap_or(old.auto_dns),
        primary: changes.primary.unwrap_or(old.primary),
    }
}

pub(crate) async fn load_host<T>(tx: &T, id: HostId) -> IpamResult<Host>
where
    T: IpamTransaction,
{
    tx.get_host(id).await?.ok_or(IpamError::HostNotFound(id.as_uuid()))
}

async fn load_assignment<T>(tx: &T, id: AssignmentId) -> IpamResult<AddressAssignment>
where
    T: IpamTransaction,
{
    tx.get_assignment(id)
        .await?
        .ok_or(IpamError::AssignmentNotFound(id.as_uuid()))
}
