//! Application state shared across handlers

use common::token::TokenService;
use sqlx::PgPool;

use crate::repositories::{CommentRepository, LikeRepository, PostRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub post_repository: PostRepository,
    pub comment_repository: CommentRepository,
    pub like_repository: LikeRepository,
}
