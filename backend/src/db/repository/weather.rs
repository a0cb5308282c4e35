//! Weather repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewWeatherData, WeatherData};

/// Latest weather observation per location key.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If nothing was published for `location`
    async fn get_weather(&self, location: &str) -> RepositoryResult<WeatherData>;

    /// Insert or replace the observation for `weather.location`.
    async fn upsert_weather(&self, weather: NewWeatherData) -> RepositoryResult<WeatherData>;
}
