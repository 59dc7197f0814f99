// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Objects
//!
//! Every mutation the services accept is an explicit command carrying its
//! own timestamp and correlation id.
//!
//! ```text
//! Command → Service → Transaction → DnsSynchronizer → RecordStore
//!    ↓                    ↓
//! Intent          commit / rollback
//! ```

pub mod commands;

pub use commands::*;
