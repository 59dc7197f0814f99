// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Record Reconciliation
//!
//! - [`record`] - zone and record shapes the core reads and writes
//! - [`store`] - the [`RecordStore`] collaborator contract
//! - [`sync`] - the [`DnsSynchronizer`] that derives and applies records

pub mod record;
pub mod store;
pub mod sync;

pub use record::{
    ContentMatch, Record, RecordDefaults, RecordFilter, RecordLookup, RecordType, Zone,
};
pub use store::RecordStore;
pub use sync::{plan, DnsPlan, DnsSynchronizer, PlannedRecord, SyncReport};
