//! Posture session and user settings repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    PostureSession, PostureState, SessionId, SessionUpdate, SettingsUpdate, UserSettings,
};

/// Storage for monitoring sessions and per-user detection settings.
#[async_trait]
pub trait PostureRepository: Send + Sync {
    // ==================== Sessions ====================

    /// Start a session with zeroed counters and no end time.
    async fn create_session(&self, user_id: Option<String>) -> RepositoryResult<PostureSession>;

    /// Apply a partial update.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no session has this id
    async fn update_session(
        &self,
        id: SessionId,
        update: SessionUpdate,
    ) -> RepositoryResult<PostureSession>;

    /// Count one classified frame against a session in a single step.
    ///
    /// Good frames leave the counters untouched.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no session has this id
    async fn record_warning(
        &self,
        id: SessionId,
        state: PostureState,
    ) -> RepositoryResult<PostureSession>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no session has this id
    async fn get_session(&self, id: SessionId) -> RepositoryResult<PostureSession>;

    /// Sessions of `user_id` ordered by start time.
    async fn list_sessions(&self, user_id: &str) -> RepositoryResult<Vec<PostureSession>>;

    /// The most recently started session of `user_id` without an end time.
    async fn current_session(&self, user_id: &str) -> RepositoryResult<Option<PostureSession>>;

    // ==================== Settings ====================

    async fn get_settings(&self, user_id: &str) -> RepositoryResult<Option<UserSettings>>;

    /// Create settings for `user_id`: defaults overlaid with `initial`.
    async fn create_settings(
        &self,
        user_id: &str,
        initial: SettingsUpdate,
    ) -> RepositoryResult<UserSettings>;

    /// # Returns
    /// * `Ok(None)` if the user has no settings yet
    async fn update_settings(
        &self,
        user_id: &str,
        update: SettingsUpdate,
    ) -> RepositoryResult<Option<UserSettings>>;
}
