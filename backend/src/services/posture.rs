//! Posture monitoring sessions and per-frame analysis.

use chrono::Utc;
use log::{debug, info, warn};

use crate::algorithms::posture;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{
    DetectionSettings, Keypoint, PostureAnalysis, PostureSession, SessionId, SessionStats,
    SessionUpdate,
};

// ==================== Sessions ====================

pub async fn start_session<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: Option<String>,
) -> RepositoryResult<PostureSession> {
    let session = repo.create_session(user_id).await?;
    info!(
        "Started posture session {} for {}",
        session.id,
        session.user_id.as_deref().unwrap_or("anonymous user")
    );
    Ok(session)
}

pub async fn update_session<R: FullRepository + ?Sized>(
    repo: &R,
    id: SessionId,
    update: SessionUpdate,
) -> RepositoryResult<PostureSession> {
    let session = repo.update_session(id, update).await?;
    debug!(
        "Updated session {}: {} warnings, {}s good posture",
        id, session.total_warnings, session.good_posture_time
    );
    Ok(session)
}

/// Stamp the end time of a running session. Ending a finished session
/// leaves it unchanged.
pub async fn end_session<R: FullRepository + ?Sized>(
    repo: &R,
    id: SessionId,
) -> RepositoryResult<PostureSession> {
    let session = repo.get_session(id).await?;
    if !session.is_active() {
        debug!("Session {} already ended", id);
        return Ok(session);
    }

    let ended = repo
        .update_session(
            id,
            SessionUpdate {
                end_time: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await?;
    info!(
        "Ended posture session {} with {} warnings",
        id, ended.total_warnings
    );
    Ok(ended)
}

pub async fn list_sessions<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Vec<PostureSession>> {
    let sessions = repo.list_sessions(user_id).await?;
    debug!("User '{}' has {} sessions", user_id, sessions.len());
    Ok(sessions)
}

pub async fn current_session<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Option<PostureSession>> {
    repo.current_session(user_id).await
}

pub async fn session_stats<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<SessionStats> {
    let sessions = repo.list_sessions(user_id).await?;
    Ok(SessionStats::from_sessions(&sessions))
}

// ==================== Analysis ====================

/// Classify one frame of keypoints.
///
/// When `session_id` is given and the frame is not in good posture, the
/// matching warning counter and the total of that session are incremented.
/// The session must exist even for good frames.
pub async fn analyze_frame<R: FullRepository + ?Sized>(
    repo: &R,
    keypoints: &[Keypoint],
    settings: &DetectionSettings,
    session_id: Option<SessionId>,
) -> RepositoryResult<PostureAnalysis> {
    let analysis = posture::analyze(keypoints, settings)
        .inspect_err(|e| warn!("Rejected posture frame: {}", e))?;

    if let Some(id) = session_id {
        if analysis.status.is_warning() {
            let session = repo.record_warning(id, analysis.status).await?;
            debug!(
                "Session {} recorded {:?} ({} warnings)",
                id, analysis.status, session.total_warnings
            );
        } else {
            repo.get_session(id).await?;
        }
    }

    Ok(analysis)
}
