// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Business rules that span more than one value object. Every function here
//! is pure: no I/O, deterministic, and returns a detailed error.

use crate::domain::{Hostname, HostId};

/// Validation result with detailed error information
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Latitude outside -90..=90 or longitude outside -180..=180
    #[error("Coordinates out of range: {latitude}, {longitude}")]
    CoordinatesOutOfRange { latitude: String, longitude: String },

    /// Composed DNS name would exceed the 253 character limit
    #[error("Fully qualified name too long ({length} characters): {fqdn}")]
    FqdnTooLong { fqdn: String, length: usize },

    /// Business rule violation
    #[error("Business rule violated: {0}")]
    BusinessRule(String),
}

/// Validate decimal geocoordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::CoordinatesOutOfRange {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        });
    }
    Ok(())
}

/// Validate that a composed FQDN stays within DNS limits
pub fn validate_fqdn(fqdn: &str) -> ValidationResult {
    if fqdn.len() > Hostname::MAX_LENGTH {
        return Err(ValidationError::FqdnTooLong {
            fqdn: fqdn.to_string(),
            length: fqdn.len(),
        });
    }
    Ok(())
}

/// Whether a rename from `current` to `requested` changes anything
///
/// Exact comparison: a case-only change is still a rename, the host keeps the
/// requested spelling while DNS names stay lowercased.
pub fn rename_required(current: &Hostname, requested: &Hostname) -> bool {
    current != requested
}

/// Validate that a host name is not held by a different host
///
/// `holder` is the host currently registered under the (case-insensitive)
/// name, if any.
pub fn validate_name_available(
    name: &Hostname,
    holder: Option<HostId>,
    claimant: Option<HostId>,
) -> ValidationResult {
    match holder {
        Some(holder) if Some(holder) != claimant => Err(ValidationError::BusinessRule(format!(
            "Hostname {} is held by host {}",
            name, holder
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, 181.0).is_err());
    }

    #[test]
    fn test_validate_fqdn() {
        assert!(validate_fqdn("foo.example.com").is_ok());
        let long = format!("{}.example.com", "a".repeat(250));
        assert!(matches!(
            validate_fqdn(&long),
            Err(ValidationError::FqdnTooLong { .. })
        ));
    }

    #[test]
    fn test_rename_required() {
        let foo = Hostname::new("foo").unwrap();
        assert!(!rename_required(&foo, &Hostname::new("foo").unwrap()));
        assert!(rename_required(&foo, &Hostname::new("Foo").unwrap()));
        assert!(rename_required(&foo, &Hostname::new("bar").unwrap()));
    }

    #[test]
    fn test_validate_name_available() {
        let name = Hostname::new("foo").unwrap();
        let me = HostId::new();
        let other = HostId::new();

        assert!(validate_name_available(&name, None, Some(me)).is_ok());
        assert!(validate_name_available(&name, Some(me), Some(me)).is_ok());
        assert!(validate_name_available(&name, Some(other), Some(me)).is_err());
        assert!(validate_name_available(&name, Some(other), None).is_err());
    }
}
