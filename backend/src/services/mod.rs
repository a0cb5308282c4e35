//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository traits. They
//! validate input, run the pure algorithms and log what they change. Every
//! function is generic over the repository so tests can use
//! [`LocalRepository`](crate::db::LocalRepository) directly.

pub mod favorites;
pub mod posture;
pub mod settings;
pub mod shelters;
pub mod weather;

pub use favorites::{add_favorite, list_favorites, remove_favorite};
pub use posture::{
    analyze_frame, current_session, end_session, list_sessions, session_stats, start_session,
    update_session,
};
pub use settings::{get_or_create_settings, should_notify, update_settings};
pub use shelters::{
    create_shelter, get_shelter, health_check, list_shelters, nearby_shelters, recommendations,
    update_occupancy,
};
pub use weather::{get_weather, update_weather};
