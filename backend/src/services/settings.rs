//! Per-user detection and notification preferences.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{SettingsUpdate, UserSettings};

/// The user's settings, created with defaults on first access.
pub async fn get_or_create_settings<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<UserSettings> {
    if let Some(settings) = repo.get_settings(user_id).await? {
        return Ok(settings);
    }
    debug!("Creating default settings for '{}'", user_id);
    repo.create_settings(user_id, SettingsUpdate::default()).await
}

/// Apply a partial update, creating the settings when the user has none.
///
/// # Returns
/// * `Err(RepositoryError::ValidationError)` - If a sensitivity is outside 1..=10
pub async fn update_settings<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
    update: SettingsUpdate,
) -> RepositoryResult<UserSettings> {
    if let Err(err) = update.validate() {
        warn!("Rejected settings update for '{}': {}", user_id, err);
        return Err(RepositoryError::validation_with_context(
            err.message().to_string(),
            ErrorContext::new("update_settings")
                .with_entity("settings")
                .with_entity_id(user_id),
        ));
    }

    let settings = match repo.update_settings(user_id, update.clone()).await? {
        Some(settings) => settings,
        None => repo.create_settings(user_id, update).await?,
    };
    info!("Updated settings for '{}'", user_id);
    Ok(settings)
}

/// Whether a posture notification may be shown now, given when the previous
/// one was shown. The first notification is always allowed.
pub fn should_notify(
    settings: &UserSettings,
    last_notified: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    let Some(last) = last_notified else {
        return true;
    };
    // A clock that went backwards counts as no time elapsed.
    let elapsed = (now - last).to_std().unwrap_or_default();
    settings.notification_frequency.allows(elapsed)
}
