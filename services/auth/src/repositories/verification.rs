//! Email verification token repository

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::EmailVerificationToken;

/// Lifetime of a verification token in hours
const TOKEN_TTL_HOURS: i64 = 24;

/// Length of the random verification token in characters
const TOKEN_LEN: usize = 48;

/// Email verification token repository
#[derive(Clone)]
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    /// Create a new verification repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a fresh verification token for a user
    ///
    /// Any previous token for the user is replaced, so only the most
    /// recently requested token is valid.
    pub async fn create_token(&self, user_id: Uuid) -> Result<String> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM email_verification_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO email_verification_tokens (id, user_id, token, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Generated email verification token for user {}", user_id);
        Ok(token)
    }

    /// Consume a verification token
    ///
    /// Marks the owning user's email as verified and deletes the token.
    /// Returns the user id on success, `None` when the token is unknown or
    /// past its expiry.
    pub async fn consume_token(&self, token: &str) -> Result<Option<Uuid>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<EmailVerificationToken> = sqlx::query_as(
            r#"
            DELETE FROM email_verification_tokens
            WHERE token = $1 AND expires_at > now()
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(consumed) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let user_id = consumed.user_id;

        sqlx::query(
            r#"
            UPDATE users
            SET email_verified = true, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Email verified for user {}", user_id);
        Ok(Some(user_id))
    }
}
