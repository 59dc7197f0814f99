// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod network_normalization;
mod rename_cascade;
