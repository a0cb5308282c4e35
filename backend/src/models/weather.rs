//! Heat and weather conditions reported per location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(WeatherId);

/// Latest weather observation for a named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub id: WeatherId,
    pub location: String,
    /// Air temperature in °C.
    pub temperature: f64,
    pub heat_index: Option<f64>,
    /// Free-text advisory such as a heat warning.
    pub weather_alert: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for publishing a new observation; replaces any earlier one for
/// the same location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeatherData {
    pub location: String,
    pub temperature: f64,
    #[serde(default)]
    pub heat_index: Option<f64>,
    #[serde(default)]
    pub weather_alert: Option<String>,
}

impl NewWeatherData {
    pub fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("Weather location must not be empty".to_string());
        }
        if !self.temperature.is_finite() {
            return Err("Temperature must be a finite number".to_string());
        }
        if matches!(self.heat_index, Some(h) if !h.is_finite()) {
            return Err("Heat index must be a finite number".to_string());
        }
        Ok(())
    }
}

impl WeatherData {
    pub fn from_new(id: WeatherId, new: NewWeatherData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            location: new.location,
            temperature: new.temperature,
            heat_index: new.heat_index,
            weather_alert: new.weather_alert,
            updated_at: now,
        }
    }
}
