//! HTTP handlers for the REST API.
//!
//! Each handler parses its request and delegates to the service layer.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AnalyzeRequest, HealthResponse, NewFavorite, NewSession, NewShelter, NewWeatherData,
    OccupancyUpdateRequest, RecommendationQuery, SessionUpdate, SettingsUpdate,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    Coordinate, PostureAnalysis, PostureSession, Recommendation, SessionId, SessionStats, Shelter,
    ShelterId, ShelterWithDistance, UserFavorite, UserSettings, WeatherData,
};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}

fn parse_coordinates(lat: &str, lng: &str) -> Result<Coordinate, AppError> {
    Coordinate::parse(lat, lng).map_err(|_| AppError::invalid_coordinates())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Shelters
// =============================================================================

/// GET /api/shelters
pub async fn list_shelters(State(state): State<AppState>) -> HandlerResult<Vec<Shelter>> {
    let shelters = services::list_shelters(state.repository.as_ref()).await?;
    Ok(Json(shelters))
}

/// GET /api/shelters/{id}
pub async fn get_shelter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Shelter> {
    let id: ShelterId = parse_id(&id, "shelter")?;
    let shelter = services::get_shelter(state.repository.as_ref(), id).await?;
    Ok(Json(shelter))
}

/// POST /api/shelters
pub async fn create_shelter(
    State(state): State<AppState>,
    Json(request): Json<NewShelter>,
) -> CreatedResult<Shelter> {
    let shelter = services::create_shelter(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(shelter)))
}

/// PATCH /api/shelters/{id}/occupancy
pub async fn update_occupancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<OccupancyUpdateRequest>,
) -> HandlerResult<Shelter> {
    let id: ShelterId = parse_id(&id, "shelter")?;
    let shelter =
        services::update_occupancy(state.repository.as_ref(), id, request.occupancy).await?;
    Ok(Json(shelter))
}

/// GET /api/shelters/nearby/{lat}/{lng}
pub async fn nearby_shelters(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(String, String)>,
) -> HandlerResult<Vec<ShelterWithDistance>> {
    let origin = parse_coordinates(&lat, &lng)?;
    let shelters = services::nearby_shelters(state.repository.as_ref(), &origin).await?;
    Ok(Json(shelters))
}

/// GET /api/recommendations/{lat}/{lng}?top=N
pub async fn recommendations(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(String, String)>,
    Query(query): Query<RecommendationQuery>,
) -> HandlerResult<Vec<Recommendation>> {
    let origin = parse_coordinates(&lat, &lng)?;
    let top_n = query.top.unwrap_or(state.config.ranking.top_n);
    if top_n == 0 {
        return Err(AppError::BadRequest(
            "top must be greater than zero".to_string(),
        ));
    }
    let recommended =
        services::recommendations(state.repository.as_ref(), &origin, top_n).await?;
    Ok(Json(recommended))
}

// =============================================================================
// Weather
// =============================================================================

/// GET /api/weather/{location}
pub async fn get_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> HandlerResult<WeatherData> {
    let weather = services::get_weather(state.repository.as_ref(), &location).await?;
    Ok(Json(weather))
}

/// POST /api/weather
pub async fn update_weather(
    State(state): State<AppState>,
    Json(request): Json<NewWeatherData>,
) -> HandlerResult<WeatherData> {
    let weather = services::update_weather(state.repository.as_ref(), request).await?;
    Ok(Json(weather))
}

// =============================================================================
// Favorites
// =============================================================================

/// GET /api/favorites/{user_id}
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<Vec<UserFavorite>> {
    let favorites = services::list_favorites(state.repository.as_ref(), &user_id).await?;
    Ok(Json(favorites))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<NewFavorite>,
) -> CreatedResult<UserFavorite> {
    let favorite = services::add_favorite(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/favorites/{user_id}/{shelter_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, shelter_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let shelter_id: ShelterId = parse_id(&shelter_id, "shelter")?;
    services::remove_favorite(state.repository.as_ref(), &user_id, shelter_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Posture sessions
// =============================================================================

/// POST /api/sessions
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<NewSession>,
) -> CreatedResult<PostureSession> {
    let session = services::start_session(state.repository.as_ref(), request.user_id).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// PATCH /api/sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<SessionUpdate>,
) -> HandlerResult<PostureSession> {
    let id: SessionId = parse_id(&id, "session")?;
    let session = services::update_session(state.repository.as_ref(), id, update).await?;
    Ok(Json(session))
}

/// POST /api/sessions/{id}/end
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<PostureSession> {
    let id: SessionId = parse_id(&id, "session")?;
    let session = services::end_session(state.repository.as_ref(), id).await?;
    Ok(Json(session))
}

/// GET /api/sessions/current/{user_id}
///
/// Responds with `null` when the user has no running session.
pub async fn current_session(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<Option<PostureSession>> {
    let session = services::current_session(state.repository.as_ref(), &user_id).await?;
    Ok(Json(session))
}

/// GET /api/sessions/user/{user_id}
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<Vec<PostureSession>> {
    let sessions = services::list_sessions(state.repository.as_ref(), &user_id).await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/user/{user_id}/stats
pub async fn session_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<SessionStats> {
    let stats = services::session_stats(state.repository.as_ref(), &user_id).await?;
    Ok(Json(stats))
}

// =============================================================================
// Settings
// =============================================================================

/// GET /api/settings/{user_id}
pub async fn get_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<UserSettings> {
    let settings = services::get_or_create_settings(state.repository.as_ref(), &user_id).await?;
    Ok(Json(settings))
}

/// PATCH /api/settings/{user_id}
pub async fn update_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<SettingsUpdate>,
) -> HandlerResult<UserSettings> {
    let settings = services::update_settings(state.repository.as_ref(), &user_id, update).await?;
    Ok(Json(settings))
}

// =============================================================================
// Posture analysis
// =============================================================================

/// POST /api/posture/analyze
pub async fn analyze_posture(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> HandlerResult<PostureAnalysis> {
    let settings = request.settings.unwrap_or_default();
    let analysis = services::analyze_frame(
        state.repository.as_ref(),
        &request.keypoints,
        &settings,
        request.session_id,
    )
    .await?;
    Ok(Json(analysis))
}
