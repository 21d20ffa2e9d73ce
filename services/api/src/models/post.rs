//! Post models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post entity
///
/// Owned exclusively by its creator; mutation and deletion are restricted
/// to the owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for post creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

/// Request for post update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostRequest {
    pub text: String,
}

/// Response for post listing with pagination
#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub items: Vec<Post>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}
