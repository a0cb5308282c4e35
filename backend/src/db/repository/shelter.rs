//! Shelter repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewShelter, Shelter, ShelterId};

/// Storage operations for cooling shelters.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ShelterRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List every shelter in insertion order.
    ///
    /// Ranking ties are broken by this order, so implementations must keep
    /// it stable across calls.
    async fn list_shelters(&self) -> RepositoryResult<Vec<Shelter>>;

    /// Retrieve one shelter.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no shelter has this id
    async fn get_shelter(&self, id: ShelterId) -> RepositoryResult<Shelter>;

    /// Store a new shelter under a freshly generated id.
    ///
    /// The occupancy level is derived from the counts. Callers are expected
    /// to have validated the payload.
    async fn create_shelter(&self, shelter: NewShelter) -> RepositoryResult<Shelter>;

    /// Replace the current head count, re-deriving the occupancy level and
    /// bumping `last_updated`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no shelter has this id
    async fn update_shelter_occupancy(
        &self,
        id: ShelterId,
        occupancy: u32,
    ) -> RepositoryResult<Shelter>;
}
