//! Like models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Like entity
///
/// The `(user_id, post_id)` pair is unique at the storage layer: a user
/// likes a given post at most once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response for the like toggle
#[derive(Debug, Clone, Serialize)]
pub struct LikeToggleResponse {
    /// True when the toggle left the post liked by the caller
    pub liked: bool,
}

/// Response for like listing with pagination
#[derive(Debug, Clone, Serialize)]
pub struct LikeListResponse {
    pub items: Vec<Like>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}
