// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Address Management
//!
//! Application services that orchestrate domain validation, persistence, and
//! DNS synchronization.
//!
//! # Architecture
//!
//! ```text
//! Command
//!     ↓
//! Service (this module)
//!     ↓
//! IpamStore::begin → IpamTransaction
//!     ↓                   ↓
//! DnsSynchronizer → RecordStore
//!     ↓
//! commit / rollback
//! ```
//!
//! # Design Principles
//!
//! 1. **Transaction Boundaries**: each mutating call is one transaction
//! 2. **Explicit Cascades**: renames and deletes are commands, not hooks
//! 3. **Time as Parameter**: commands carry their timestamp
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cim_ipam::{AssignmentService, DnsSynchronizer, InMemoryStore};
//!
//! let store = Arc::new(InMemoryStore::with_zones(["example.com"]));
//! let service = AssignmentService::new(store, DnsSynchronizer::new("example.com"));
//! let outcome = service.create(command).await?;
//! ```

pub mod assignment;
pub mod host;
pub mod subnet;

pub use assignment::{AssignmentOutcome, AssignmentService};
pub use host::HostRegistry;
pub use subnet::SubnetAllocator;

use tracing::warn;

use crate::errors::IpamResult;
use crate::store::IpamTransaction;

/// Commit on success, roll back on failure, and hand back the result
pub(crate) async fn finish<T, X>(tx: X, result: IpamResult<T>) -> IpamResult<T>
where
    X: IpamTransaction,
{
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "rolling back transaction");
            tx.rollback().await?;
            Err(err)
        }
    }
}
