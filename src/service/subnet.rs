// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet Allocator
//!
//! Stores normalized networks and computes over the assignments that fall
//! inside them. Read-mostly: nothing here mutates an assignment.

use std::sync::Arc;
use tracing::{info, instrument};

use super::finish;
use crate::aggregate::AllocateSubnetCommand;
use crate::domain::{
    parse_network, AddressAssignment, HostCount, IpVersion, Network, Subnet, SubnetId,
    Utilization,
};
use crate::errors::{IpamError, IpamResult};
use crate::store::{AssignmentStore, IpamStore, IpamTransaction, SubnetStore};

/// Subnet allocation and utilization service
#[derive(Debug)]
pub struct SubnetAllocator<S> {
    store: Arc<S>,
}

impl<S: IpamStore> SubnetAllocator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Parse CIDR text into its normalized network
    pub fn normalize(text: &str) -> IpamResult<Network> {
        Ok(parse_network(text)?)
    }

    /// Store a new subnet
    ///
    /// # Errors
    ///
    /// - `InvalidNetwork` if the text does not parse
    /// - `DuplicateSubnet` if the normalized network is already allocated
    #[instrument(skip(self, command), fields(
        network = %command.network,
        correlation_id = %command.correlation_id,
    ))]
    pub async fn allocate(&self, command: AllocateSubnetCommand) -> IpamResult<Subnet> {
        let mut subnet = Subnet::new(Self::normalize(&command.network)?);
        subnet.owner = command.owner;
        subnet.notes = command.notes;

        let mut tx = self.store.begin().await?;
        let result = tx.insert_subnet(subnet.clone()).await;
        finish(tx, result).await?;

        info!(subnet = %subnet.id, normalized = %subnet.network, "subnet allocated");
        Ok(subnet)
    }

    /// Remove a subnet; assignments inside it are untouched
    #[instrument(skip(self))]
    pub async fn release(&self, id: SubnetId) -> IpamResult<Subnet> {
        let mut tx = self.store.begin().await?;
        let result = tx
            .delete_subnet(id)
            .await
            .and_then(|subnet| subnet.ok_or_else(|| IpamError::SubnetNotFound(id.to_string())));
        finish(tx, result).await
    }

    /// Every usable IPv4 host address paired with its assignment, if any
    ///
    /// Addresses are produced lazily; only the assignments inside the
    /// subnet are loaded up front.
    ///
    /// # Errors
    ///
    /// - `AddressFamilyNotEnumerable` for IPv6 subnets
    pub async fn utilization(&self, subnet: &Subnet) -> IpamResult<Utilization> {
        if subnet.network.version() == IpVersion::V6 {
            return Err(IpamError::AddressFamilyNotEnumerable(
                subnet.network.to_string(),
            ));
        }

        let assigned = self.in_use(subnet).await?;
        Ok(Utilization::new(subnet.network.hosts(), assigned))
    }

    pub fn host_count(&self, subnet: &Subnet) -> HostCount {
        subnet.host_count()
    }

    /// Assignments between the first and last address, ordered by address
    pub async fn in_use(&self, subnet: &Subnet) -> IpamResult<Vec<AddressAssignment>> {
        let tx = self.store.begin().await?;
        let result = tx
            .assignments_in_range(subnet.first_address(), subnet.last_address())
            .await;
        tx.rollback().await?;
        result
    }

    /// Host-form PTR names for every usable IPv4 host
    pub fn reverse_names(&self, subnet: &Subnet) -> Vec<String> {
        subnet.reverse_names()
    }

    pub async fn get(&self, id: SubnetId) -> IpamResult<Subnet> {
        let tx = self.store.begin().await?;
        let result = tx.get_subnet(id).await;
        tx.rollback().await?;
        result?.ok_or_else(|| IpamError::SubnetNotFound(id.to_string()))
    }

    /// Look a subnet up by CIDR text, normalizing first
    pub async fn find_by_network(&self, text: &str) -> IpamResult<Option<Subnet>> {
        let network = Self::normalize(text)?;
        let tx = self.store.begin().await?;
        let result = tx.find_subnet(&network).await;
        tx.rollback().await?;
        result
    }
}
