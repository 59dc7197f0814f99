// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Registry
//!
//! Registers hosts and carries name changes through to DNS.
//!
//! # Rename Cascade
//!
//! ```text
//! phase 1: remove DNS for every auto-DNS assignment under the old name
//!          persist the new name
//! phase 2: re-save every assignment (delete + insert)
//!          add DNS for every auto-DNS assignment under the new name
//! ```
//!
//! Both phases run in one transaction. Removing everything before adding
//! anything keeps stores that enforce forward-address uniqueness happy.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::assignment::load_host;
use super::{finish, AssignmentService};
use crate::aggregate::{
    DeleteAssignmentCommand, DeleteHostCommand, HostDetails, RegisterHostCommand,
    RenameHostCommand, UpdateHostDetailsCommand,
};
use crate::dns::DnsSynchronizer;
use crate::domain::invariants::{rename_required, validate_fqdn, validate_name_available};
use crate::domain::{Host, HostId, Hostname};
use crate::errors::{IpamError, IpamResult};
use crate::store::{AssignmentStore, HostStore, IpamStore, IpamTransaction};

/// Host lifecycle service
#[derive(Debug)]
pub struct HostRegistry<S> {
    store: Arc<S>,
    assignments: AssignmentService<S>,
}

impl<S: IpamStore> HostRegistry<S> {
    pub fn new(store: Arc<S>, dns: DnsSynchronizer) -> Self {
        let assignments = AssignmentService::new(Arc::clone(&store), dns);
        Self { store, assignments }
    }

    fn dns(&self) -> &DnsSynchronizer {
        self.assignments.synchronizer()
    }

    /// Register a new host
    ///
    /// # Errors
    ///
    /// - `DuplicateHostname` if the name is taken, ignoring case
    /// - `Validation` if the host FQDN is too long
    #[instrument(skip(self, command), fields(
        name = %command.name,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn register(&self, command: RegisterHostCommand) -> IpamResult<Host> {
        let mut tx = self.store.begin().await?;
        let result = self.register_in(&mut tx, command).await;
        let host = finish(tx, result).await?;
        info!(host = %host.id, "host registered");
        Ok(host)
    }

    async fn register_in(
        &self,
        tx: &mut S::Transaction,
        command: RegisterHostCommand,
    ) -> IpamResult<Host> {
        self.check_name(&*tx, &command.name, None).await?;

        let mut host = Host::builder(command.name, command.host_type, command.timestamp).build();
        apply_details(&mut host, command.details);
        tx.save_host(host.clone()).await?;

        Ok(host)
    }

    /// Rename a host and move every DNS record with it
    ///
    /// An unchanged name is a no-op.
    ///
    /// # Errors
    ///
    /// - `HostNotFound` if the host does not exist
    /// - `DuplicateHostname` if another host holds the name
    #[instrument(skip(self, command), fields(
        host = %command.host_id,
        new_name = %command.new_name,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn rename(&self, command: RenameHostCommand) -> IpamResult<Host> {
        let mut tx = self.store.begin().await?;
        let result = self.rename_in(&mut tx, command).await;
        finish(tx, result).await
    }

    async fn rename_in(
        &self,
        tx: &mut S::Transaction,
        command: RenameHostCommand,
    ) -> IpamResult<Host> {
        let mut host = load_host(&*tx, command.host_id).await?;
        if !rename_required(&host.name, &command.new_name) {
            debug!("name unchanged, nothing to do");
            return Ok(host);
        }
        self.check_name(&*tx, &command.new_name, Some(host.id)).await?;

        let dns = self.dns();
        let owned = tx.assignments_for_host(host.id).await?;

        let mut removed = 0;
        for assignment in owned.iter().filter(|a| a.auto_dns) {
            removed += dns.remove_records(tx, assignment, &host.name).await?;
        }

        let old_name = std::mem::replace(&mut host.name, command.new_name);
        host.updated_at = command.timestamp;
        tx.save_host(host.clone()).await?;

        let mut created = 0;
        for assignment in &owned {
            tx.delete_assignment(assignment.id).await?;
            tx.insert_assignment(assignment.clone()).await?;
            if assignment.auto_dns {
                let report = dns.add_records(tx, assignment, &host.name, None).await?;
                created += report.created.len() + report.patched.len();
            }
        }

        info!(from = %old_name, to = %host.name, removed, created, "host renamed");
        Ok(host)
    }

    /// Overwrite attributes that have no DNS effect
    #[instrument(skip(self, command), fields(
        host = %command.host_id,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn update_details(&self, command: UpdateHostDetailsCommand) -> IpamResult<Host> {
        let mut tx = self.store.begin().await?;
        let result = self.update_details_in(&mut tx, command).await;
        finish(tx, result).await
    }

    async fn update_details_in(
        &self,
        tx: &mut S::Transaction,
        command: UpdateHostDetailsCommand,
    ) -> IpamResult<Host> {
        let mut host = load_host(&*tx, command.host_id).await?;
        if let Some(host_type) = command.host_type {
            host.host_type = host_type;
        }
        apply_details(&mut host, command.details);
        host.updated_at = command.timestamp;
        tx.save_host(host.clone()).await?;
        Ok(host)
    }

    /// Delete a host after deleting each of its assignments
    ///
    /// Every assignment goes through [`AssignmentService::delete`] in its
    /// own transaction; a failure stops the cascade with the host intact.
    /// Assignments created while the cascade runs are removed, DNS
    /// included, in the transaction that deletes the host.
    #[instrument(skip(self, command), fields(
        host = %command.host_id,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn delete(&self, command: DeleteHostCommand) -> IpamResult<Host> {
        let owned = self.assignments.list_for_host(command.host_id).await?;
        // Fail before touching anything if the host is unknown.
        self.get(command.host_id).await?;

        for assignment in owned {
            self.assignments
                .delete(DeleteAssignmentCommand {
                    assignment_id: assignment.id,
                    timestamp: command.timestamp,
                    correlation_id: command.correlation_id,
                })
                .await?;
        }

        let mut tx = self.store.begin().await?;
        let result = self.delete_in(&mut tx, command.host_id).await;
        let host = finish(tx, result).await?;
        info!(name = %host.name, "host deleted");
        Ok(host)
    }

    async fn delete_in(&self, tx: &mut S::Transaction, id: HostId) -> IpamResult<Host> {
        let host = load_host(&*tx, id).await?;

        let stragglers = tx.assignments_for_host(id).await?;
        for assignment in &stragglers {
            if assignment.auto_dns {
                self.dns().remove_records(tx, assignment, &host.name).await?;
            }
            tx.delete_assignment(assignment.id).await?;
        }
        if !stragglers.is_empty() {
            debug!(count = stragglers.len(), "removed assignments added during delete");
        }

        tx.delete_host(id)
            .await?
            .ok_or(IpamError::HostNotFound(id.as_uuid()))
    }

    pub async fn get(&self, id: HostId) -> IpamResult<Host> {
        let tx = self.store.begin().await?;
        let result = load_host(&tx, id).await;
        tx.rollback().await?;
        result
    }

    /// Case-insensitive lookup by name
    pub async fn find_by_name(&self, name: &Hostname) -> IpamResult<Option<Host>> {
        let tx = self.store.begin().await?;
        let result = tx.find_host_by_name(name).await;
        tx.rollback().await?;
        result
    }

    async fn check_name(
        &self,
        tx: &S::Transaction,
        name: &Hostname,
        claimant: Option<HostId>,
    ) -> IpamResult<()> {
        validate_fqdn(&name.qualify(self.dns().root_domain()))?;

        let holder = tx.find_host_by_name(name).await?.map(|h| h.id);
        validate_name_available(name, holder, claimant)
            .map_err(|_| IpamError::DuplicateHostname(name.to_string()))
    }
}

fn apply_details(host: &mut Host, details: HostDetails) {
    host.os = details.os;
    host.site_id = details.site_id;
    host.owner = details.owner;
    host.admins = details.admins;
    host.coordinates = details.coordinates;
    host.eth_mac = details.eth_mac;
    host.wlan_mac = details.wlan_mac;
    host.notes = details.notes;
}
