//! Per-user detection and notification preferences.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::posture::{
    validate_sensitivity, DetectionSettings, DEFAULT_NAIL_BITING_SENSITIVITY,
    DEFAULT_TURTLE_NECK_SENSITIVITY,
};
use crate::algorithms::error::AnalysisResult;
use crate::define_id_type;

define_id_type!(SettingsId);

/// Minimum gap between two posture notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NotificationFrequency {
    #[serde(rename = "immediate")]
    Immediate,
    #[default]
    #[serde(rename = "5s")]
    FiveSeconds,
    #[serde(rename = "10s")]
    TenSeconds,
    #[serde(rename = "30s")]
    ThirtySeconds,
}

impl NotificationFrequency {
    pub fn interval(&self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::FiveSeconds => Duration::from_secs(5),
            Self::TenSeconds => Duration::from_secs(10),
            Self::ThirtySeconds => Duration::from_secs(30),
        }
    }

    /// Whether a new notification may fire `elapsed` after the previous one.
    pub fn allows(&self, elapsed: Duration) -> bool {
        elapsed > self.interval()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: SettingsId,
    pub user_id: String,
    pub turtle_neck_detection_enabled: bool,
    pub nail_biting_detection_enabled: bool,
    pub turtle_neck_sensitivity: u8,
    pub nail_biting_sensitivity: u8,
    pub sound_notifications_enabled: bool,
    pub visual_notifications_enabled: bool,
    pub notification_frequency: NotificationFrequency,
    pub dark_mode: bool,
}

impl UserSettings {
    /// Default preferences for a user who has not configured anything.
    pub fn defaults_for(id: SettingsId, user_id: impl Into<String>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            turtle_neck_detection_enabled: true,
            nail_biting_detection_enabled: true,
            turtle_neck_sensitivity: DEFAULT_TURTLE_NECK_SENSITIVITY,
            nail_biting_sensitivity: DEFAULT_NAIL_BITING_SENSITIVITY,
            sound_notifications_enabled: true,
            visual_notifications_enabled: true,
            notification_frequency: NotificationFrequency::default(),
            dark_mode: false,
        }
    }

    pub fn detection(&self) -> DetectionSettings {
        DetectionSettings {
            turtle_neck_enabled: self.turtle_neck_detection_enabled,
            nail_biting_enabled: self.nail_biting_detection_enabled,
            turtle_neck_sensitivity: self.turtle_neck_sensitivity,
            nail_biting_sensitivity: self.nail_biting_sensitivity,
        }
    }

    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.turtle_neck_detection_enabled {
            self.turtle_neck_detection_enabled = v;
        }
        if let Some(v) = update.nail_biting_detection_enabled {
            self.nail_biting_detection_enabled = v;
        }
        if let Some(v) = update.turtle_neck_sensitivity {
            self.turtle_neck_sensitivity = v;
        }
        if let Some(v) = update.nail_biting_sensitivity {
            self.nail_biting_sensitivity = v;
        }
        if let Some(v) = update.sound_notifications_enabled {
            self.sound_notifications_enabled = v;
        }
        if let Some(v) = update.visual_notifications_enabled {
            self.visual_notifications_enabled = v;
        }
        if let Some(v) = update.notification_frequency {
            self.notification_frequency = v;
        }
        if let Some(v) = update.dark_mode {
            self.dark_mode = v;
        }
    }
}

/// Partial settings update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub turtle_neck_detection_enabled: Option<bool>,
    #[serde(default)]
    pub nail_biting_detection_enabled: Option<bool>,
    #[serde(default)]
    pub turtle_neck_sensitivity: Option<u8>,
    #[serde(default)]
    pub nail_biting_sensitivity: Option<u8>,
    #[serde(default)]
    pub sound_notifications_enabled: Option<bool>,
    #[serde(default)]
    pub visual_notifications_enabled: Option<bool>,
    #[serde(default)]
    pub notification_frequency: Option<NotificationFrequency>,
    #[serde(default)]
    pub dark_mode: Option<bool>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> AnalysisResult<()> {
        if let Some(v) = self.turtle_neck_sensitivity {
            validate_sensitivity("turtle neck", v)?;
        }
        if let Some(v) = self.nail_biting_sensitivity {
            validate_sensitivity("nail biting", v)?;
        }
        Ok(())
    }
}
