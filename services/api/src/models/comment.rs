//! Comment models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Comment entity
///
/// Comments are deleted together with their parent post; the foreign key
/// cascades on post deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for comment creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Request for comment update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: String,
}

/// Response for comment listing with pagination
#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub items: Vec<Comment>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}
