// Copyright (c) 2025 - Cowboy AI, Inc.
//! Record Store Collaborator Interface
//!
//! The DNS zone/record table lives outside the core. The synchronizer only
//! needs this narrow contract, always called inside an open transaction.

use async_trait::async_trait;
use uuid::Uuid;

use super::{Record, RecordDefaults, RecordFilter, RecordLookup, Zone};
use crate::errors::IpamResult;

/// Narrow read/write interface over the DNS record table
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find a zone by name (case-insensitive)
    async fn find_zone(&self, name: &str) -> IpamResult<Option<Zone>>;

    /// Return the record matching `lookup`, creating it from `lookup` plus
    /// `defaults` when absent
    ///
    /// The boolean is `true` when the record was created.
    ///
    /// # Errors
    ///
    /// - `ZoneNotFound` if the lookup zone does not exist
    /// - `DuplicateRecord` if the store's uniqueness rules reject the insert
    async fn get_or_create(
        &mut self,
        lookup: RecordLookup,
        defaults: RecordDefaults,
    ) -> IpamResult<(Record, bool)>;

    /// Overwrite the content of an existing record
    async fn set_content(&mut self, id: Uuid, content: &str) -> IpamResult<Record>;

    /// Delete every record matching `filter`, returning how many went away
    async fn delete_where(&mut self, filter: &RecordFilter) -> IpamResult<usize>;
}
