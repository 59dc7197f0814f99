// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sites and geocoordinates

use serde::{Deserialize, Serialize};

use super::invariants::{validate_coordinates, ValidationResult};
use super::SiteId;

/// Decimal latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values off the globe
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A physical location hosts can be placed at
///
/// Reference data only; nothing in the reconciliation core depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub comment: String,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SiteId::new(),
            name: name.into(),
            coordinates: None,
            status: String::new(),
            comment: String::new(),
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}
