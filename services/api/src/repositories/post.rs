//! Post repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::post::Post;

/// Post repository
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post owned by `user_id`
    pub async fn create(&self, user_id: Uuid, text: &str) -> Result<Post> {
        info!("Creating post for user {}", user_id);

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, text, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// List posts, newest first, with the total count
    pub async fn list(&self, limit: u32, offset: i64) -> Result<(Vec<Post>, i64)> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok((posts, total))
    }

    /// Update a post's text, returning the updated row
    pub async fn update(&self, id: Uuid, text: &str) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET text = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, user_id, text, created_at, updated_at
            "#,
        )
        .bind(text)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Delete a post
    ///
    /// Comments and likes of the post go with it; the foreign keys cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        info!("Deleting post {}", id);

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
