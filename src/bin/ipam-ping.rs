// Copyright (c) 2025 - Cowboy AI, Inc.
//! Address Reachability Tool
//!
//! Pings every address (or every usable host of every network) given on the
//! command line and prints one line per address.
//!
//! Run with: cargo run --bin ipam-ping -- 10.0.0.1 192.0.2.0/30
//!
//! Configuration comes from `IPAM_LOG_LEVEL`, `IPAM_PING_TIMEOUT`, and
//! `IPAM_PING_CONCURRENCY`. Networks larger than `ping.max_targets` are
//! refused.

use anyhow::{bail, Context, Result};
use cim_ipam::{diagnostics, parse_network, telemetry, Address, IpamConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = IpamConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.telemetry).context("Failed to initialize tracing")?;

    let targets: Vec<String> = std::env::args().skip(1).collect();
    if targets.is_empty() {
        bail!("usage: ipam-ping <address|network>...");
    }

    let mut addresses: Vec<Address> = Vec::new();
    for target in &targets {
        let network =
            parse_network(target).with_context(|| format!("Invalid target: {target}"))?;
        addresses.extend(diagnostics::targets(&network, &config.ping)?);
    }

    info!(
        count = addresses.len(),
        timeout = config.ping.timeout_secs,
        concurrency = config.ping.concurrency,
        "pinging"
    );

    let mut up = 0;
    for (address, reachable) in diagnostics::ping_all(addresses, &config.ping).await {
        if reachable {
            up += 1;
        }
        println!("{address}\t{}", if reachable { "up" } else { "down" });
    }

    info!(up, "done");
    Ok(())
}
