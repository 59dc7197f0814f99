// Copyright (c) 2025 - Cowboy AI, Inc.
//! Store Abstraction
//!
//! The persistence the services need, expressed as traits. Every mutation
//! runs inside an [`IpamTransaction`] that spans the address data and the DNS
//! record table, so a create/replace/delete or a rename is all-or-nothing.
//!
//! # Transaction Semantics
//!
//! ```text
//! begin() → reads/writes on the transaction → commit()
//!                                           ↘ rollback() / drop
//! ```
//!
//! Implementations must guarantee:
//!
//! - **Atomicity**: nothing written through a transaction is observable
//!   unless `commit` succeeds
//! - **Isolation**: writers touching the same entity are serialized
//! - **Uniqueness**: addresses, host names (case-insensitive), and subnet
//!   networks are unique

use async_trait::async_trait;

use crate::dns::RecordStore;
use crate::domain::{
    Address, AddressAssignment, AssignmentId, Host, HostId, Hostname, Network, Subnet, SubnetId,
};
use crate::errors::IpamResult;

pub mod memory;

pub use memory::InMemoryStore;

/// Address assignment persistence
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn get_assignment(&self, id: AssignmentId) -> IpamResult<Option<AddressAssignment>>;

    /// All assignments owned by a host, ordered by address
    async fn assignments_for_host(&self, host_id: HostId) -> IpamResult<Vec<AddressAssignment>>;

    /// Assignments with `min <= address <= max`, ordered by address
    async fn assignments_in_range(
        &self,
        min: Address,
        max: Address,
    ) -> IpamResult<Vec<AddressAssignment>>;

    /// Insert an assignment
    ///
    /// # Errors
    ///
    /// - `DuplicateAddress` if another assignment holds the address
    async fn insert_assignment(&mut self, assignment: AddressAssignment) -> IpamResult<()>;

    /// Delete an assignment, returning it if it existed
    async fn delete_assignment(&mut self, id: AssignmentId)
        -> IpamResult<Option<AddressAssignment>>;
}

/// Host persistence
#[async_trait]
pub trait HostStore: Send + Sync {
    async fn get_host(&self, id: HostId) -> IpamResult<Option<Host>>;

    /// Case-insensitive lookup by name
    async fn find_host_by_name(&self, name: &Hostname) -> IpamResult<Option<Host>>;

    /// Insert a new host or overwrite an existing one with the same id
    ///
    /// # Errors
    ///
    /// - `DuplicateHostname` if a different host holds the name
    async fn save_host(&mut self, host: Host) -> IpamResult<()>;

    async fn delete_host(&mut self, id: HostId) -> IpamResult<Option<Host>>;
}

/// Subnet persistence
#[async_trait]
pub trait SubnetStore: Send + Sync {
    async fn get_subnet(&self, id: SubnetId) -> IpamResult<Option<Subnet>>;

    async fn find_subnet(&self, network: &Network) -> IpamResult<Option<Subnet>>;

    /// # Errors
    ///
    /// - `DuplicateSubnet` if the network is already allocated
    async fn insert_subnet(&mut self, subnet: Subnet) -> IpamResult<()>;

    async fn delete_subnet(&mut self, id: SubnetId) -> IpamResult<Option<Subnet>>;
}

/// One atomic unit of work across every store
#[async_trait]
pub trait IpamTransaction: AssignmentStore + HostStore + SubnetStore + RecordStore {
    /// Publish every write made through this transaction
    async fn commit(self) -> IpamResult<()>;

    /// Discard every write made through this transaction
    async fn rollback(self) -> IpamResult<()>;
}

/// Entry point for opening transactions
#[async_trait]
pub trait IpamStore: Send + Sync {
    type Transaction: IpamTransaction;

    /// Begin a transaction; may wait for other writers to finish
    async fn begin(&self) -> IpamResult<Self::Transaction>;
}
