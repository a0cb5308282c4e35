//! Favorites repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewFavorite, ShelterId, UserFavorite};

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All favorites of `user_id`, oldest first.
    async fn list_favorites(&self, user_id: &str) -> RepositoryResult<Vec<UserFavorite>>;

    async fn add_favorite(&self, favorite: NewFavorite) -> RepositoryResult<UserFavorite>;

    /// Remove the bookmark of `shelter_id` by `user_id`.
    ///
    /// # Returns
    /// * `Ok(true)` if a favorite was removed, `Ok(false)` if none matched
    async fn remove_favorite(&self, user_id: &str, shelter_id: ShelterId)
        -> RepositoryResult<bool>;
}
