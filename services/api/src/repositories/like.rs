//! Like repository for database operations
//!
//! The `(user_id, post_id)` pair is unique at the storage layer, which is
//! what makes the toggle race-safe: two concurrent toggles from the same
//! user resolve to a single consistent outcome through the constraint, not
//! through in-process locking.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::like::Like;

/// Like repository
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Create a new like repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically flip the existence of the `(user_id, post_id)` pair
    ///
    /// Returns true when the toggle left the post liked by the user. The
    /// insert defers to the uniqueness constraint: zero rows affected means
    /// the pair already existed, so it is removed instead.
    pub async fn toggle(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO likes (id, user_id, post_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!("User {} liked post {}", user_id, post_id);
            return Ok(true);
        }

        sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        info!("User {} unliked post {}", user_id, post_id);
        Ok(false)
    }

    /// List a post's likes, newest first, with the total count
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        limit: u32,
        offset: i64,
    ) -> Result<(Vec<Like>, i64)> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, user_id, post_id, created_at
            FROM likes
            WHERE post_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count_for_post(post_id).await?;

        Ok((likes, total))
    }

    /// Count the likes on a post
    pub async fn count_for_post(&self, post_id: Uuid) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
