// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime configuration
//!
//! Defaults, then JSON or environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `IPAM_ROOT_DOMAIN` | `root_domain` |
//! | `IPAM_LOG_LEVEL` | `telemetry.log_level` |
//! | `IPAM_PING_TIMEOUT` | `ping.timeout_secs` |
//! | `IPAM_PING_CONCURRENCY` | `ping.concurrency` |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::Hostname;
use crate::errors::{IpamError, IpamResult};

pub const ENV_ROOT_DOMAIN: &str = "IPAM_ROOT_DOMAIN";
pub const ENV_LOG_LEVEL: &str = "IPAM_LOG_LEVEL";
pub const ENV_PING_TIMEOUT: &str = "IPAM_PING_TIMEOUT";
pub const ENV_PING_CONCURRENCY: &str = "IPAM_PING_CONCURRENCY";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpamConfig {
    /// Domain every host FQDN is built under
    pub root_domain: String,
    pub telemetry: TelemetryConfig,
    pub ping: PingConfig,
}

impl Default for IpamConfig {
    fn default() -> Self {
        Self {
            root_domain: "localdomain".to_string(),
            telemetry: TelemetryConfig::default(),
            ping: PingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    /// Seconds to wait for a single echo reply
    pub timeout_secs: u64,
    /// Most `ping` children running at once
    pub concurrency: usize,
    /// Largest network `ipam-ping` will expand into targets
    pub max_targets: u64,
}

impl PingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 1,
            concurrency: 64,
            max_targets: 65_536,
        }
    }
}

impl IpamConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> IpamResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> IpamResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root_domain) = lookup(ENV_ROOT_DOMAIN) {
            config.root_domain = root_domain;
        }
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            config.telemetry.log_level = log_level;
        }
        if let Some(timeout) = lookup(ENV_PING_TIMEOUT) {
            config.ping.timeout_secs = parse_number(ENV_PING_TIMEOUT, &timeout)?;
        }
        if let Some(concurrency) = lookup(ENV_PING_CONCURRENCY) {
            config.ping.concurrency = parse_number(ENV_PING_CONCURRENCY, &concurrency)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> IpamResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IpamResult<()> {
        Hostname::new(&self.root_domain).map_err(|e| {
            IpamError::Configuration(format!("invalid root domain {:?}: {e}", self.root_domain))
        })?;
        if self.ping.timeout_secs == 0 {
            return Err(IpamError::Configuration(
                "ping timeout must be at least one second".to_string(),
            ));
        }
        if self.ping.concurrency == 0 || self.ping.max_targets == 0 {
            return Err(IpamError::Configuration(
                "ping concurrency and max_targets must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> IpamResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| IpamError::Configuration(format!("{key} is not a number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = IpamConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ping.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = IpamConfig::from_lookup(lookup(&[
            (ENV_ROOT_DOMAIN, "net.example.org"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_PING_TIMEOUT, "3"),
        ]))
        .unwrap();

        assert_eq!(config.root_domain, "net.example.org");
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.ping.timeout_secs, 3);
    }

    #[test]
    fn test_ping_concurrency() {
        let config = IpamConfig::from_lookup(lookup(&[(ENV_PING_CONCURRENCY, "8")])).unwrap();
        assert_eq!(config.ping.concurrency, 8);

        let err = IpamConfig::from_lookup(lookup(&[(ENV_PING_CONCURRENCY, "0")])).unwrap_err();
        assert!(matches!(err, IpamError::Configuration(_)));
    }

    #[test]
    fn test_bad_timeout() {
        let err = IpamConfig::from_lookup(lookup(&[(ENV_PING_TIMEOUT, "soon")])).unwrap_err();
        assert!(matches!(err, IpamError::Configuration(_)));
    }

    #[test]
    fn test_json_partial() {
        let config = IpamConfig::from_json_str(r#"{"root_domain": "example.com"}"#).unwrap();
        assert_eq!(config.root_domain, "example.com");
        assert_eq!(config.telemetry, TelemetryConfig::default());
    }

    #[test]
    fn test_json_rejects_bad_root_domain() {
        let err = IpamConfig::from_json_str(r#"{"root_domain": "-bad-.com"}"#).unwrap_err();
        assert!(matches!(err, IpamError::Configuration(_)));
    }
}
