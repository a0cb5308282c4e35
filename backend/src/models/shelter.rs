//! Cooling-shelter records and the projections served by the ranking API.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::Coordinate;
use crate::define_id_type;

define_id_type!(ShelterId);

/// Occupancy rate above which a shelter counts as crowded.
pub const HIGH_OCCUPANCY_RATE: f64 = 0.7;
/// Occupancy rate above which a shelter counts as moderately used.
pub const MEDIUM_OCCUPANCY_RATE: f64 = 0.4;

/// Kind of facility operating the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterType {
    Public,
    Commercial,
    Religious,
    Transport,
}

/// Bucketed occupancy, always derived from the current/max counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    Low,
    Medium,
    High,
}

impl OccupancyLevel {
    /// Derives the level from the occupancy rate `current / max`.
    ///
    /// A zero capacity is treated as full.
    pub fn from_counts(current: u32, max_capacity: u32) -> Self {
        if max_capacity == 0 {
            return Self::High;
        }
        let rate = f64::from(current) / f64::from(max_capacity);
        if rate > HIGH_OCCUPANCY_RATE {
            Self::High
        } else if rate > MEDIUM_OCCUPANCY_RATE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A shelter as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub location: Coordinate,
    #[serde(rename = "type")]
    pub shelter_type: ShelterType,
    pub occupancy_level: OccupancyLevel,
    pub current_occupancy: u32,
    pub max_capacity: u32,
    pub operating_hours: String,
    pub rating: f64,
    pub amenities: BTreeSet<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

impl Shelter {
    /// Materializes a creation payload under the given id.
    pub fn from_new(id: ShelterId, new: NewShelter, now: DateTime<Utc>) -> Self {
        let occupancy_level = OccupancyLevel::from_counts(new.current_occupancy, new.max_capacity);
        Self {
            id,
            name: new.name,
            address: new.address,
            location: new.location,
            shelter_type: new.shelter_type,
            occupancy_level,
            current_occupancy: new.current_occupancy,
            max_capacity: new.max_capacity,
            operating_hours: new.operating_hours,
            rating: new.rating,
            amenities: new.amenities,
            description: new.description,
            is_active: new.is_active,
            last_updated: now,
        }
    }

    /// Sets the head count and re-derives the occupancy level.
    pub fn set_occupancy(&mut self, occupancy: u32, now: DateTime<Utc>) {
        self.current_occupancy = occupancy;
        self.occupancy_level = OccupancyLevel::from_counts(occupancy, self.max_capacity);
        self.last_updated = now;
    }

    pub fn occupancy_rate(&self) -> f64 {
        if self.max_capacity == 0 {
            return 1.0;
        }
        f64::from(self.current_occupancy) / f64::from(self.max_capacity)
    }

    /// True when the opening-hours text mentions round-the-clock service.
    pub fn is_open_24h(&self) -> bool {
        self.operating_hours.contains("24")
    }

    pub fn has_amenity(&self, tag: &str) -> bool {
        self.amenities.contains(tag)
    }
}

fn default_true() -> bool {
    true
}

/// Payload for registering a shelter.
///
/// The occupancy level is not accepted from callers; it is derived from the
/// counts when the shelter is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShelter {
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub location: Coordinate,
    #[serde(rename = "type")]
    pub shelter_type: ShelterType,
    #[serde(default)]
    pub current_occupancy: u32,
    pub max_capacity: u32,
    pub operating_hours: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewShelter {
    /// Checks the invariants a stored shelter must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Shelter name must not be empty".to_string());
        }
        if !self.location.is_finite() {
            return Err(format!(
                "Shelter coordinates ({}, {}) must be finite",
                self.location.latitude, self.location.longitude
            ));
        }
        if self.max_capacity == 0 {
            return Err("Shelter max capacity must be greater than zero".to_string());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!("Shelter rating {} is outside 0.0..=5.0", self.rating));
        }
        Ok(())
    }
}

/// A shelter together with its distance from the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterWithDistance {
    #[serde(flatten)]
    pub shelter: Shelter,
    /// Great-circle distance in kilometers.
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<f64>,
}

impl ShelterWithDistance {
    pub fn new(shelter: Shelter, distance: f64) -> Self {
        Self {
            shelter,
            distance,
            recommendation_score: None,
        }
    }
}

/// One entry of the ranked recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub shelter: ShelterWithDistance,
    /// 1-based position in the ranking.
    pub rank: usize,
    pub reason: String,
}
