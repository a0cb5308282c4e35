//! Weather lookups and updates.

use log::{debug, info, warn};

use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{NewWeatherData, WeatherData};

pub async fn get_weather<R: FullRepository + ?Sized>(
    repo: &R,
    location: &str,
) -> RepositoryResult<WeatherData> {
    debug!("Fetching weather for '{}'", location);
    repo.get_weather(location).await
}

/// Publish a new observation, replacing the previous one for its location.
pub async fn update_weather<R: FullRepository + ?Sized>(
    repo: &R,
    weather: NewWeatherData,
) -> RepositoryResult<WeatherData> {
    if let Err(message) = weather.validate() {
        warn!("Rejected weather update for '{}': {}", weather.location, message);
        return Err(RepositoryError::validation_with_context(
            message,
            ErrorContext::new("update_weather").with_entity("weather"),
        ));
    }

    let stored = repo.upsert_weather(weather).await?;
    info!(
        "Weather for '{}' updated: {:.1}°C{}",
        stored.location,
        stored.temperature,
        stored
            .weather_alert
            .as_deref()
            .map(|alert| format!(" ({})", alert))
            .unwrap_or_default()
    );
    Ok(stored)
}
