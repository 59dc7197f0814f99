// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;
use crate::errors::{IpamError, IpamResult};

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn env_filter(config: &TelemetryConfig) -> IpamResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            IpamError::Configuration(format!("invalid log level {:?}: {e}", config.log_level))
        }),
    }
}

/// Install a global fmt subscriber
///
/// # Errors
///
/// - `Configuration` if the level does not parse or a subscriber is
///   already installed
pub fn init_tracing(config: &TelemetryConfig) -> IpamResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(false)
        .try_init()
        .map_err(|e| IpamError::Configuration(format!("tracing already initialized: {e}")))
}
