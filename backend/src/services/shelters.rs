//! Shelter listing, registration and recommendation.

use log::{debug, info, warn};

use crate::algorithms::ranking;
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{Coordinate, NewShelter, Recommendation, Shelter, ShelterId, ShelterWithDistance};

// ==================== Health & Connection ====================

/// Pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Shelter CRUD ====================

pub async fn list_shelters<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Shelter>> {
    let shelters = repo.list_shelters().await?;
    debug!("Listed {} shelters", shelters.len());
    Ok(shelters)
}

pub async fn get_shelter<R: FullRepository + ?Sized>(
    repo: &R,
    id: ShelterId,
) -> RepositoryResult<Shelter> {
    debug!("Fetching shelter {}", id);
    repo.get_shelter(id).await
}

/// Validate and store a new shelter.
///
/// # Returns
/// * `Err(RepositoryError::ValidationError)` - If the payload is malformed
pub async fn create_shelter<R: FullRepository + ?Sized>(
    repo: &R,
    shelter: NewShelter,
) -> RepositoryResult<Shelter> {
    if let Err(message) = shelter.validate() {
        warn!("Rejected shelter '{}': {}", shelter.name, message);
        return Err(RepositoryError::validation_with_context(
            message,
            ErrorContext::new("create_shelter").with_entity("shelter"),
        ));
    }

    let created = repo.create_shelter(shelter).await?;
    info!(
        "Created shelter {} ('{}', {:?} occupancy)",
        created.id, created.name, created.occupancy_level
    );
    Ok(created)
}

/// Set the current head count of a shelter.
///
/// Takes a signed count so that negative values coming off the wire can be
/// rejected with a validation error instead of failing deserialization.
pub async fn update_occupancy<R: FullRepository + ?Sized>(
    repo: &R,
    id: ShelterId,
    occupancy: i64,
) -> RepositoryResult<Shelter> {
    let occupancy = u32::try_from(occupancy).map_err(|_| {
        warn!("Rejected occupancy {} for shelter {}", occupancy, id);
        RepositoryError::validation_with_context(
            format!("Occupancy {} must be between 0 and {}", occupancy, u32::MAX),
            ErrorContext::new("update_occupancy")
                .with_entity("shelter")
                .with_entity_id(id),
        )
    })?;

    let updated = repo.update_shelter_occupancy(id, occupancy).await?;
    info!(
        "Shelter {} occupancy set to {}/{} ({:?})",
        id, updated.current_occupancy, updated.max_capacity, updated.occupancy_level
    );
    Ok(updated)
}

// ==================== Ranking ====================

/// Every shelter annotated with its distance from `origin`, in storage order.
pub async fn nearby_shelters<R: FullRepository + ?Sized>(
    repo: &R,
    origin: &Coordinate,
) -> RepositoryResult<Vec<ShelterWithDistance>> {
    let shelters = repo.list_shelters().await?;
    let annotated = ranking::with_distance(&shelters, origin)?;
    debug!(
        "Computed distances for {} shelters from ({}, {})",
        annotated.len(),
        origin.latitude,
        origin.longitude
    );
    Ok(annotated)
}

/// The `top_n` best shelters for a user at `origin`.
pub async fn recommendations<R: FullRepository + ?Sized>(
    repo: &R,
    origin: &Coordinate,
    top_n: usize,
) -> RepositoryResult<Vec<Recommendation>> {
    let shelters = repo.list_shelters().await?;
    let recommended = ranking::recommend(&shelters, origin, top_n)?;
    debug!(
        "Recommended {} of {} shelters for ({}, {})",
        recommended.len(),
        shelters.len(),
        origin.latitude,
        origin.longitude
    );
    Ok(recommended)
}
