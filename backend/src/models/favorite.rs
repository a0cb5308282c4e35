//! Shelters a user has bookmarked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shelter::ShelterId;
use crate::define_id_type;

define_id_type!(FavoriteId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFavorite {
    pub id: FavoriteId,
    pub user_id: String,
    pub shelter_id: ShelterId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: String,
    pub shelter_id: ShelterId,
}
