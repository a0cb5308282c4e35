//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across focused traits so each can be
//! implemented and tested on its own.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`shelter`]: Shelter CRUD and occupancy updates
//! - [`weather`]: Per-location weather observations
//! - [`favorite`]: User bookmarks of shelters
//! - [`posture`]: Posture sessions and user detection settings
//!
//! # Convenience Trait Bound
//!
//! Services that need every capability take [`FullRepository`]:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let shelters = repo.list_shelters().await?;
//!     let weather = repo.get_weather("서울시 강남구").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod favorite;
pub mod posture;
pub mod shelter;
pub mod weather;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use favorite::FavoriteRepository;
pub use posture::PostureRepository;
pub use shelter::ShelterRepository;
pub use weather::WeatherRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all four
/// repository traits.
pub trait FullRepository:
    ShelterRepository + WeatherRepository + FavoriteRepository + PostureRepository
{
}

impl<T> FullRepository for T where
    T: ShelterRepository + WeatherRepository + FavoriteRepository + PostureRepository
{
}
