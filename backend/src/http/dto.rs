//! Data Transfer Objects for the HTTP API.
//!
//! Domain records already serialize in the wire format, so only request
//! envelopes and small responses live here.

use serde::{Deserialize, Serialize};

use crate::models::{DetectionSettings, Keypoint, SessionId};

pub use crate::models::{
    NewFavorite, NewSession, NewShelter, NewWeatherData, SessionUpdate, SettingsUpdate,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Storage status ("connected", "disconnected" or an error message)
    pub database: String,
}

/// Body of `PATCH /api/shelters/{id}/occupancy`.
///
/// Signed so negative counts reach validation instead of failing to parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OccupancyUpdateRequest {
    pub occupancy: i64,
}

/// Query string of `GET /api/recommendations/{lat}/{lng}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecommendationQuery {
    /// Number of recommendations; the configured default when absent.
    pub top: Option<usize>,
}

/// Body of `POST /api/posture/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub keypoints: Vec<Keypoint>,
    #[serde(default)]
    pub settings: Option<DetectionSettings>,
    /// Session whose warning counters should be updated.
    #[serde(default)]
    pub session_id: Option<SessionId>,
}
