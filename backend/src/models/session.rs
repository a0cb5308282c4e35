//! Posture-monitoring sessions and their warning counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::posture::PostureState;
use crate::define_id_type;

define_id_type!(SessionId);

/// One monitoring run. A session without an end time is still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureSession {
    pub id: SessionId,
    pub user_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds spent in good posture.
    pub good_posture_time: u64,
    pub turtle_neck_warnings: u32,
    pub nail_biting_warnings: u32,
    pub total_warnings: u32,
}

impl PostureSession {
    pub fn start(id: SessionId, user_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            start_time: now,
            end_time: None,
            good_posture_time: 0,
            turtle_neck_warnings: 0,
            nail_biting_warnings: 0,
            total_warnings: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Counts a classified frame against the session. Good frames are a no-op.
    ///
    /// Counters stop at `u32::MAX`.
    pub fn record(&mut self, state: PostureState) {
        let counter = match state {
            PostureState::Good => return,
            PostureState::TurtleNeck => &mut self.turtle_neck_warnings,
            PostureState::NailBiting => &mut self.nail_biting_warnings,
        };
        *counter = counter.saturating_add(1);
        self.total_warnings = self.total_warnings.saturating_add(1);
    }

    pub fn apply(&mut self, update: SessionUpdate) {
        if let Some(end_time) = update.end_time {
            self.end_time = Some(end_time);
        }
        if let Some(seconds) = update.good_posture_time {
            self.good_posture_time = seconds;
        }
        if let Some(count) = update.turtle_neck_warnings {
            self.turtle_neck_warnings = count;
        }
        if let Some(count) = update.nail_biting_warnings {
            self.nail_biting_warnings = count;
        }
        if let Some(count) = update.total_warnings {
            self.total_warnings = count;
        }
    }
}

/// Payload for starting a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Partial session update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub good_posture_time: Option<u64>,
    #[serde(default)]
    pub turtle_neck_warnings: Option<u32>,
    #[serde(default)]
    pub nail_biting_warnings: Option<u32>,
    #[serde(default)]
    pub total_warnings: Option<u32>,
}

/// Totals over all of a user's sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_count: usize,
    pub good_posture_seconds: u64,
    pub turtle_neck_warnings: u64,
    pub nail_biting_warnings: u64,
    pub total_warnings: u64,
}

impl SessionStats {
    pub fn from_sessions(sessions: &[PostureSession]) -> Self {
        sessions.iter().fold(
            Self {
                session_count: sessions.len(),
                ..Default::default()
            },
            |mut acc, s| {
                acc.good_posture_seconds =
                    acc.good_posture_seconds.saturating_add(s.good_posture_time);
                acc.turtle_neck_warnings = acc
                    .turtle_neck_warnings
                    .saturating_add(u64::from(s.turtle_neck_warnings));
                acc.nail_biting_warnings = acc
                    .nail_biting_warnings
                    .saturating_add(u64::from(s.nail_biting_warnings));
                acc.total_warnings = acc
                    .total_warnings
                    .saturating_add(u64::from(s.total_warnings));
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_warnings() {
        let mut s = PostureSession::start(SessionId::generate(), None, Utc::now());
        s.record(PostureState::Good);
        s.record(PostureState::TurtleNeck);
        s.record(PostureState::NailBiting);
        s.record(PostureState::NailBiting);

        assert_eq!(s.turtle_neck_warnings, 1);
        assert_eq!(s.nail_biting_warnings, 2);
        assert_eq!(s.total_warnings, 3);
        assert!(s.is_active());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut s = PostureSession::start(SessionId::generate(), Some("u1".into()), Utc::now());
        s.record(PostureState::TurtleNeck);

        s.apply(SessionUpdate {
            good_posture_time: Some(120),
            ..Default::default()
        });
        assert_eq!(s.good_posture_time, 120);
        assert_eq!(s.turtle_neck_warnings, 1);
        assert!(s.is_active());

        s.apply(SessionUpdate {
            end_time: Some(Utc::now()),
            ..Default::default()
        });
        assert!(!s.is_active());
    }

    #[test]
    fn test_stats_aggregate() {
        let mut a = PostureSession::start(SessionId::generate(), None, Utc::now());
        a.good_posture_time = 60;
        a.record(PostureState::TurtleNeck);
        let mut b = PostureSession::start(SessionId::generate(), None, Utc::now());
        b.good_posture_time = 30;
        b.record(PostureState::NailBiting);
        b.record(PostureState::NailBiting);

        let stats = SessionStats::from_sessions(&[a, b]);
        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.good_posture_seconds, 90);
        assert_eq!(stats.turtle_neck_warnings, 1);
        assert_eq!(stats.nail_biting_warnings, 2);
        assert_eq!(stats.total_warnings, 3);

        assert_eq!(SessionStats::from_sessions(&[]), SessionStats::default());
    }

    #[test]
    fn test_record_saturates_at_max() {
        let mut s = PostureSession::start(SessionId::generate(), None, Utc::now());
        s.apply(SessionUpdate {
            nail_biting_warnings: Some(u32::MAX),
            total_warnings: Some(u32::MAX),
            ..Default::default()
        });
        s.record(PostureState::NailBiting);
        s.record(PostureState::TurtleNeck);

        assert_eq!(s.nail_biting_warnings, u32::MAX);
        assert_eq!(s.turtle_neck_warnings, 1);
        assert_eq!(s.total_warnings, u32::MAX);
    }

    #[test]
    fn test_stats_saturate_instead_of_overflowing() {
        let mut a = PostureSession::start(SessionId::generate(), Some("u1".into()), Utc::now());
        a.good_posture_time = u64::MAX;
        let mut b = a.clone();
        b.id = SessionId::generate();
        b.good_posture_time = 10;

        let stats = SessionStats::from_sessions(&[a, b]);
        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.good_posture_seconds, u64::MAX);
    }
}
