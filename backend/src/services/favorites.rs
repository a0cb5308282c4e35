//! User bookmarks of shelters.

use log::{debug, info, warn};

use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{NewFavorite, ShelterId, UserFavorite};

pub async fn list_favorites<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Vec<UserFavorite>> {
    let favorites = repo.list_favorites(user_id).await?;
    debug!("User '{}' has {} favorites", user_id, favorites.len());
    Ok(favorites)
}

/// Bookmark a shelter.
///
/// # Returns
/// * `Err(RepositoryError::ValidationError)` - If the user id is blank or
///   the shelter does not exist
pub async fn add_favorite<R: FullRepository + ?Sized>(
    repo: &R,
    favorite: NewFavorite,
) -> RepositoryResult<UserFavorite> {
    let context = || {
        ErrorContext::new("add_favorite")
            .with_entity("favorite")
            .with_entity_id(favorite.shelter_id)
    };

    if favorite.user_id.trim().is_empty() {
        warn!("Rejected favorite with blank user id");
        return Err(RepositoryError::validation_with_context(
            "User id must not be empty",
            context(),
        ));
    }

    match repo.get_shelter(favorite.shelter_id).await {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            warn!(
                "Rejected favorite of unknown shelter {} by '{}'",
                favorite.shelter_id, favorite.user_id
            );
            return Err(RepositoryError::validation_with_context(
                format!("Shelter {} does not exist", favorite.shelter_id),
                context(),
            ));
        }
        Err(err) => return Err(err),
    }

    let stored = repo.add_favorite(favorite).await?;
    info!(
        "User '{}' bookmarked shelter {}",
        stored.user_id, stored.shelter_id
    );
    Ok(stored)
}

/// Remove a bookmark.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - If the user had not bookmarked the shelter
pub async fn remove_favorite<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: &str,
    shelter_id: ShelterId,
) -> RepositoryResult<()> {
    if repo.remove_favorite(user_id, shelter_id).await? {
        info!("User '{}' removed shelter {} from favorites", user_id, shelter_id);
        Ok(())
    } else {
        Err(RepositoryError::not_found_with_context(
            format!("Favorite of shelter {} by '{}' not found", shelter_id, user_id),
            ErrorContext::new("remove_favorite")
                .with_entity("favorite")
                .with_entity_id(shelter_id),
        ))
    }
}
