//! In-memory local repository implementation.
//!
//! Stores everything in hash maps behind a single `parking_lot::RwLock`,
//! which makes it fast, deterministic and isolated for tests and local
//! development. Data does not survive a restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::db::sample_data;
use crate::models::{
    FavoriteId, NewFavorite, NewShelter, NewWeatherData, PostureSession, PostureState, SessionId,
    SessionUpdate, SettingsId, SettingsUpdate, Shelter, ShelterId, UserFavorite, UserSettings,
    WeatherData, WeatherId,
};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same data.
///
/// # Example
/// ```
/// use heatwise::db::repositories::LocalRepository;
/// use heatwise::db::ShelterRepository;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::with_sample_data();
/// let shelters = repo.list_shelters().await.unwrap();
/// assert_eq!(shelters.len(), 5);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    shelters: HashMap<ShelterId, Shelter>,
    // Insertion order; ranking ties fall back to it.
    shelter_order: Vec<ShelterId>,

    weather: HashMap<String, WeatherData>,

    favorites: Vec<UserFavorite>,

    sessions: HashMap<SessionId, PostureSession>,
    session_order: Vec<SessionId>,

    settings: HashMap<String, UserSettings>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            shelters: HashMap::new(),
            shelter_order: Vec::new(),
            weather: HashMap::new(),
            favorites: Vec::new(),
            sessions: HashMap::new(),
            session_order: Vec::new(),
            settings: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn insert_shelter(&mut self, shelter: Shelter) {
        self.shelter_order.push(shelter.id);
        self.shelters.insert(shelter.id, shelter);
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with the demo shelters and weather.
    pub fn with_sample_data() -> Self {
        let repo = Self::new();
        repo.seed_sample_data();
        repo
    }

    /// Add the demo shelters and weather observation to the current data.
    pub fn seed_sample_data(&self) {
        let now = Utc::now();
        let mut data = self.data.write();
        for shelter in sample_data::sample_shelters(now) {
            data.insert_shelter(shelter);
        }
        let weather = sample_data::sample_weather(now);
        data.weather.insert(weather.location.clone(), weather);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn shelter_count(&self) -> usize {
        self.data.read().shelters.len()
    }

    pub fn session_count(&self) -> usize {
        self.data.read().sessions.len()
    }

    pub fn has_shelter(&self, id: ShelterId) -> bool {
        self.data.read().shelters.contains_key(&id)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "In-memory store is marked unhealthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShelterRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_shelters(&self) -> RepositoryResult<Vec<Shelter>> {
        self.check_health("list_shelters")?;
        let data = self.data.read();
        Ok(data
            .shelter_order
            .iter()
            .filter_map(|id| data.shelters.get(id).cloned())
            .collect())
    }

    async fn get_shelter(&self, id: ShelterId) -> RepositoryResult<Shelter> {
        self.check_health("get_shelter")?;
        self.data
            .read()
            .shelters
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::entity_not_found("shelter", id, "get_shelter"))
    }

    async fn create_shelter(&self, shelter: NewShelter) -> RepositoryResult<Shelter> {
        self.check_health("create_shelter")?;
        let shelter = Shelter::from_new(ShelterId::generate(), shelter, Utc::now());
        self.data.write().insert_shelter(shelter.clone());
        Ok(shelter)
    }

    async fn update_shelter_occupancy(
        &self,
        id: ShelterId,
        occupancy: u32,
    ) -> RepositoryResult<Shelter> {
        self.check_health("update_shelter_occupancy")?;
        let mut data = self.data.write();
        let shelter = data.shelters.get_mut(&id).ok_or_else(|| {
            RepositoryError::entity_not_found("shelter", id, "update_shelter_occupancy")
        })?;
        shelter.set_occupancy(occupancy, Utc::now());
        Ok(shelter.clone())
    }
}

#[async_trait]
impl WeatherRepository for LocalRepository {
    async fn get_weather(&self, location: &str) -> RepositoryResult<WeatherData> {
        self.check_health("get_weather")?;
        self.data
            .read()
            .weather
            .get(location)
            .cloned()
            .ok_or_else(|| RepositoryError::entity_not_found("weather", location, "get_weather"))
    }

    async fn upsert_weather(&self, weather: NewWeatherData) -> RepositoryResult<WeatherData> {
        self.check_health("upsert_weather")?;
        let mut data = self.data.write();
        // Keep the id stable across updates of the same location.
        let id = data
            .weather
            .get(&weather.location)
            .map(|w| w.id)
            .unwrap_or_else(WeatherId::generate);
        let record = WeatherData::from_new(id, weather, Utc::now());
        data.weather.insert(record.location.clone(), record.clone());
        Ok(record)
    }
}

#[async_trait]
impl FavoriteRepository for LocalRepository {
    async fn list_favorites(&self, user_id: &str) -> RepositoryResult<Vec<UserFavorite>> {
        self.check_health("list_favorites")?;
        Ok(self
            .data
            .read()
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, favorite: NewFavorite) -> RepositoryResult<UserFavorite> {
        self.check_health("add_favorite")?;
        let record = UserFavorite {
            id: FavoriteId::generate(),
            user_id: favorite.user_id,
            shelter_id: favorite.shelter_id,
            created_at: Utc::now(),
        };
        self.data.write().favorites.push(record.clone());
        Ok(record)
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        shelter_id: ShelterId,
    ) -> RepositoryResult<bool> {
        self.check_health("remove_favorite")?;
        let mut data = self.data.write();
        let before = data.favorites.len();
        data.favorites
            .retain(|f| !(f.user_id == user_id && f.shelter_id == shelter_id));
        Ok(data.favorites.len() < before)
    }
}

#[async_trait]
impl PostureRepository for LocalRepository {
    async fn create_session(&self, user_id: Option<String>) -> RepositoryResult<PostureSession> {
        self.check_health("create_session")?;
        let session = PostureSession::start(SessionId::generate(), user_id, Utc::now());
        let mut data = self.data.write();
        data.session_order.push(session.id);
        data.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn update_session(
        &self,
        id: SessionId,
        update: SessionUpdate,
    ) -> RepositoryResult<PostureSession> {
        self.check_health("update_session")?;
        let mut data = self.data.write();
        let session = data
            .sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::entity_not_found("session", id, "update_session"))?;
        session.apply(update);
        Ok(session.clone())
    }

    async fn record_warning(
        &self,
        id: SessionId,
        state: PostureState,
    ) -> RepositoryResult<PostureSession> {
        self.check_health("record_warning")?;
        let mut data = self.data.write();
        let session = data
            .sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::entity_not_found("session", id, "record_warning"))?;
        session.record(state);
        Ok(session.clone())
    }

    async fn get_session(&self, id: SessionId) -> RepositoryResult<PostureSession> {
        self.check_health("get_session")?;
        self.data
            .read()
            .sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::entity_not_found("session", id, "get_session"))
    }

    async fn list_sessions(&self, user_id: &str) -> RepositoryResult<Vec<PostureSession>> {
        self.check_health("list_sessions")?;
        let data = self.data.read();
        let mut sessions: Vec<PostureSession> = data
            .session_order
            .iter()
            .filter_map(|id| data.sessions.get(id))
            .filter(|s| s.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.start_time);
        Ok(sessions)
    }

    async fn current_session(&self, user_id: &str) -> RepositoryResult<Option<PostureSession>> {
        self.check_health("current_session")?;
        let data = self.data.read();
        Ok(data
            .session_order
            .iter()
            .rev()
            .filter_map(|id| data.sessions.get(id))
            .find(|s| s.user_id.as_deref() == Some(user_id) && s.is_active())
            .cloned())
    }

    async fn get_settings(&self, user_id: &str) -> RepositoryResult<Option<UserSettings>> {
        self.check_health("get_settings")?;
        Ok(self.data.read().settings.get(user_id).cloned())
    }

    async fn create_settings(
        &self,
        user_id: &str,
        initial: SettingsUpdate,
    ) -> RepositoryResult<UserSettings> {
        self.check_health("create_settings")?;
        let mut settings = UserSettings::defaults_for(SettingsId::generate(), user_id);
        settings.apply(initial);
        self.data
            .write()
            .settings
            .insert(user_id.to_string(), settings.clone());
        Ok(settings)
    }

    async fn update_settings(
        &self,
        user_id: &str,
        update: SettingsUpdate,
    ) -> RepositoryResult<Option<UserSettings>> {
        self.check_health("update_settings")?;
        let mut data = self.data.write();
        Ok(data.settings.get_mut(user_id).map(|settings| {
            settings.apply(update);
            settings.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, OccupancyLevel, ShelterType};

    fn new_shelter(name: &str) -> NewShelter {
        NewShelter {
            name: name.to_string(),
            address: "Gangnam-gu".to_string(),
            location: Coordinate {
                latitude: 37.5,
                longitude: 127.0,
            },
            shelter_type: ShelterType::Commercial,
            current_occupancy: 0,
            max_capacity: 10,
            operating_hours: "10:00-22:00".to_string(),
            rating: 3.0,
            amenities: Default::default(),
            description: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_shelters_keep_insertion_order() {
        let repo = LocalRepository::new();
        for name in ["c", "a", "b"] {
            repo.create_shelter(new_shelter(name)).await.unwrap();
        }
        let names: Vec<String> = repo
            .list_shelters()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(repo.shelter_count(), 3);
    }

    #[tokio::test]
    async fn test_update_occupancy_rederives_level() {
        let repo = LocalRepository::new();
        let created = repo.create_shelter(new_shelter("x")).await.unwrap();
        assert_eq!(created.occupancy_level, OccupancyLevel::Low);

        let updated = repo.update_shelter_occupancy(created.id, 8).await.unwrap();
        assert_eq!(updated.occupancy_level, OccupancyLevel::High);
        assert!(updated.last_updated >= created.last_updated);

        let missing = repo
            .update_shelter_occupancy(ShelterId::generate(), 1)
            .await
            .unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_with_retryable_error() {
        let repo = LocalRepository::with_sample_data();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());

        let err = repo.list_shelters().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.context().operation.as_deref(), Some("list_shelters"));

        repo.set_healthy(true);
        assert_eq!(repo.list_shelters().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_clear_keeps_health_flag() {
        let repo = LocalRepository::with_sample_data();
        repo.set_healthy(false);
        repo.clear();
        repo.set_healthy(true);
        assert_eq!(repo.shelter_count(), 0);
        assert!(repo.get_weather(sample_data::SAMPLE_WEATHER_LOCATION).await.is_err());
    }

    #[tokio::test]
    async fn test_weather_upsert_keeps_id() {
        let repo = LocalRepository::with_sample_data();
        let before = repo
            .get_weather(sample_data::SAMPLE_WEATHER_LOCATION)
            .await
            .unwrap();
        let after = repo
            .upsert_weather(NewWeatherData {
                location: sample_data::SAMPLE_WEATHER_LOCATION.to_string(),
                temperature: 36.5,
                heat_index: None,
                weather_alert: None,
            })
            .await
            .unwrap();
        assert_eq!(before.id, after.id);
        assert_eq!(after.temperature, 36.5);
        assert!(after.weather_alert.is_none());
    }

    #[tokio::test]
    async fn test_favorites_are_scoped_per_user() {
        let repo = LocalRepository::new();
        let shelter = repo.create_shelter(new_shelter("x")).await.unwrap();
        for user in ["alice", "bob"] {
            repo.add_favorite(NewFavorite {
                user_id: user.to_string(),
                shelter_id: shelter.id,
            })
            .await
            .unwrap();
        }

        assert!(repo.remove_favorite("alice", shelter.id).await.unwrap());
        assert!(!repo.remove_favorite("alice", shelter.id).await.unwrap());
        assert!(repo.list_favorites("alice").await.unwrap().is_empty());
        assert_eq!(repo.list_favorites("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_current_session_is_latest_open_one() {
        let repo = LocalRepository::new();
        let first = repo.create_session(Some("u1".into())).await.unwrap();
        let second = repo.create_session(Some("u1".into())).await.unwrap();
        repo.create_session(None).await.unwrap();

        let current = repo.current_session("u1").await.unwrap().unwrap();
        assert_eq!(current.id, second.id);

        repo.update_session(
            second.id,
            SessionUpdate {
                end_time: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let current = repo.current_session("u1").await.unwrap().unwrap();
        assert_eq!(current.id, first.id);

        assert_eq!(repo.list_sessions("u1").await.unwrap().len(), 2);
        assert_eq!(repo.session_count(), 3);
        assert!(repo.current_session("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_settings_create_and_update() {
        let repo = LocalRepository::new();
        assert!(repo.get_settings("u1").await.unwrap().is_none());
        assert!(repo
            .update_settings("u1", SettingsUpdate::default())
            .await
            .unwrap()
            .is_none());

        let created = repo
            .create_settings(
                "u1",
                SettingsUpdate {
                    dark_mode: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(created.dark_mode);
        assert_eq!(created.turtle_neck_sensitivity, 7);

        let updated = repo
            .update_settings(
                "u1",
                SettingsUpdate {
                    nail_biting_sensitivity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.nail_biting_sensitivity, 9);
        assert!(updated.dark_mode);
    }

    #[tokio::test]
    async fn test_record_warning() {
        let repo = LocalRepository::new();
        let session = repo.create_session(None).await.unwrap();

        repo.record_warning(session.id, PostureState::TurtleNeck)
            .await
            .unwrap();
        repo.record_warning(session.id, PostureState::Good)
            .await
            .unwrap();
        let stored = repo
            .record_warning(session.id, PostureState::NailBiting)
            .await
            .unwrap();
        assert_eq!(stored.turtle_neck_warnings, 1);
        assert_eq!(stored.nail_biting_warnings, 1);
        assert_eq!(stored.total_warnings, 2);

        let err = repo
            .record_warning(SessionId::generate(), PostureState::NailBiting)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
