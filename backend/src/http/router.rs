//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing, body
//! limit) and returns an axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Browser clients are served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.server.body_limit_bytes;

    let api = Router::new()
        // Shelters and ranking
        .route(
            "/shelters",
            get(handlers::list_shelters).post(handlers::create_shelter),
        )
        .route("/shelters/{id}", get(handlers::get_shelter))
        .route("/shelters/{id}/occupancy", patch(handlers::update_occupancy))
        .route("/shelters/nearby/{lat}/{lng}", get(handlers::nearby_shelters))
        .route("/recommendations/{lat}/{lng}", get(handlers::recommendations))
        // Weather
        .route("/weather", post(handlers::update_weather))
        .route("/weather/{location}", get(handlers::get_weather))
        // Favorites
        .route("/favorites", post(handlers::add_favorite))
        .route("/favorites/{user_id}", get(handlers::list_favorites))
        .route(
            "/favorites/{user_id}/{shelter_id}",
            delete(handlers::remove_favorite),
        )
        // Posture sessions
        .route("/sessions", post(handlers::start_session))
        .route("/sessions/{id}", patch(handlers::update_session))
        .route("/sessions/{id}/end", post(handlers::end_session))
        .route("/sessions/current/{user_id}", get(handlers::current_session))
        .route("/sessions/user/{user_id}", get(handlers::list_sessions))
        .route("/sessions/user/{user_id}/stats", get(handlers::session_stats))
        // Settings
        .route(
            "/settings/{user_id}",
            get(handlers::get_settings).patch(handlers::update_settings),
        )
        // Posture analysis
        .route("/posture/analyze", post(handlers::analyze_posture));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
    }
}
