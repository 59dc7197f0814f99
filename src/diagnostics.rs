// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reachability checks
//!
//! Shells out to the system `ping` for a single echo request. Nothing here
//! touches the store; results are advisory.

use futures::stream::{self, StreamExt};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::PingConfig;
use crate::domain::{Address, IpVersion, Network};
use crate::errors::{IpamError, IpamResult};

/// Grace period on top of the ping timeout before the child is abandoned
const SPAWN_GRACE: Duration = Duration::from_secs(2);

/// Whether `address` answered one echo request within the timeout
///
/// Spawn failures and non-zero exits both report `false`.
#[instrument(skip(config), fields(timeout = config.timeout_secs))]
pub async fn ping(address: Address, config: &PingConfig) -> bool {
    let mut command = Command::new("ping");
    command
        .arg("-c")
        .arg("1")
        .arg("-W")
        .arg(config.timeout_secs.to_string())
        .arg(address.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let status = tokio::time::timeout(config.timeout() + SPAWN_GRACE, command.status()).await;
    let reachable = match status {
        Ok(Ok(status)) => status.success(),
        Ok(Err(err)) => {
            debug!(error = %err, "could not run ping");
            false
        }
        Err(_) => {
            debug!("ping did not exit in time");
            false
        }
    };

    debug!(reachable, "ping finished");
    reachable
}

/// Ping every address, at most `config.concurrency` at a time
///
/// Results come back in input order.
pub async fn ping_all<I>(addresses: I, config: &PingConfig) -> Vec<(Address, bool)>
where
    I: IntoIterator<Item = Address>,
{
    stream::iter(addresses)
        .map(|address| async move { (address, ping(address, config).await) })
        .buffered(config.concurrency.max(1))
        .collect()
        .await
}

/// Addresses to probe for one network: the address itself for a single
/// host, otherwise every usable host
///
/// # Errors
///
/// - `AddressFamilyNotEnumerable` for IPv6 networks wider than one address
/// - `TooManyTargets` if the network holds more than `config.max_targets`
///   addresses
pub fn targets(network: &Network, config: &PingConfig) -> IpamResult<Vec<Address>> {
    if network.host_bits() == 0 {
        return Ok(vec![network.base()]);
    }
    if network.version() == IpVersion::V6 {
        return Err(IpamError::AddressFamilyNotEnumerable(network.to_string()));
    }

    let count = network.num_addresses().unwrap_or(u128::MAX);
    if count > u128::from(config.max_targets) {
        return Err(IpamError::TooManyTargets {
            network: network.to_string(),
            count,
            limit: config.max_targets,
        });
    }

    Ok(network.hosts().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_network;

    fn config() -> PingConfig {
        PingConfig {
            timeout_secs: 1,
            concurrency: 2,
            max_targets: 256,
        }
    }

    #[tokio::test]
    async fn test_ping_all_preserves_order() {
        // TEST-NET-1 is never routed, so every ping fails (or ping is absent).
        let addresses: Vec<Address> = vec![
            "192.0.2.1".parse().unwrap(),
            "192.0.2.2".parse().unwrap(),
            "192.0.2.3".parse().unwrap(),
        ];

        let results = ping_all(addresses.clone(), &config()).await;
        let returned: Vec<Address> = results.iter().map(|(a, _)| *a).collect();
        assert_eq!(returned, addresses);
    }

    #[test]
    fn test_targets_single_address() {
        let network = parse_network("2001:db8::1").unwrap();
        assert_eq!(targets(&network, &config()).unwrap(), vec![network.base()]);
    }

    #[test]
    fn test_targets_within_limit() {
        let network = parse_network("192.0.2.0/24").unwrap();
        assert_eq!(targets(&network, &config()).unwrap().len(), 254);
    }

    #[test]
    fn test_targets_refuses_large_network() {
        let network = parse_network("10.0.0.0/8").unwrap();
        let err = targets(&network, &config()).unwrap_err();
        assert_eq!(
            err,
            IpamError::TooManyTargets {
                network: "10.0.0.0/8".to_string(),
                count: 1 << 24,
                limit: 256,
            }
        );
    }

    #[test]
    fn test_targets_refuses_ipv6_network() {
        let network = parse_network("2001:db8::/120").unwrap();
        let err = targets(&network, &config()).unwrap_err();
        assert!(matches!(err, IpamError::AddressFamilyNotEnumerable(_)));
    }
}
