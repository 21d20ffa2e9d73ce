//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{
    authz::authorize_owner,
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{
        PageQuery,
        comment::{Comment, CommentListResponse, CreateCommentRequest, UpdateCommentRequest},
        like::{LikeListResponse, LikeToggleResponse},
        post::{CreatePostRequest, Post, PostListResponse, UpdatePostRequest},
    },
    state::AppState,
    validation,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
        .route("/posts/:id/comments", post(create_comment))
        .route("/comments/:id", put(update_comment).delete(delete_comment))
        .route("/posts/:id/like", post(toggle_like))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
        .route("/posts/:id/comments", get(list_comments))
        .route("/posts/:id/likes", get(list_likes))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "service": "api-service"
    }))
}

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_text(&payload.text).map_err(ApiError::Validation)?;

    let created = state
        .post_repository
        .create(user.id, &payload.text)
        .await
        .map_err(|e| {
            error!("Failed to create post: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// List posts with pagination
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, limit, offset) = query.resolve();

    let (items, total) = state
        .post_repository
        .list(limit, offset)
        .await
        .map_err(|e| {
            error!("Failed to list posts: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(PostListResponse {
        items,
        page,
        limit,
        total,
    }))
}

/// Get a post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let found = find_post(&state, id).await?;
    Ok(Json(found))
}

/// Update a post, owner only
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_text(&payload.text).map_err(ApiError::Validation)?;

    let existing = find_post(&state, id).await?;
    authorize_owner(user.id, existing.user_id)?;

    let updated = state
        .post_repository
        .update(id, &payload.text)
        .await
        .map_err(|e| {
            error!("Failed to update post: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete a post, owner only
///
/// Comments and likes of the post are removed with it (storage-level
/// cascade).
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = find_post(&state, id).await?;
    authorize_owner(user.id, existing.user_id)?;

    let deleted = state.post_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete post: {}", e);
        ApiError::InternalServerError
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Create a comment on a post
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_text(&payload.text).map_err(ApiError::Validation)?;

    let parent = find_post(&state, post_id).await?;

    let created = state
        .comment_repository
        .create(parent.id, user.id, &payload.text)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// List a post's comments with pagination
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let parent = find_post(&state, post_id).await?;
    let (page, limit, offset) = query.resolve();

    let (items, total) = state
        .comment_repository
        .list_for_post(parent.id, limit, offset)
        .await
        .map_err(|e| {
            error!("Failed to list comments: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(CommentListResponse {
        items,
        page,
        limit,
        total,
    }))
}

/// Update a comment, owner only
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_text(&payload.text).map_err(ApiError::Validation)?;

    let existing = find_comment(&state, id).await?;
    authorize_owner(user.id, existing.user_id)?;

    let updated = state
        .comment_repository
        .update(id, &payload.text)
        .await
        .map_err(|e| {
            error!("Failed to update comment: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete a comment, owner only
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = find_comment(&state, id).await?;
    authorize_owner(user.id, existing.user_id)?;

    let deleted = state.comment_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete comment: {}", e);
        ApiError::InternalServerError
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle the caller's like on a post
///
/// There is no ownership guard here beyond acting as yourself: the
/// authenticated id is the acting id.
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let parent = find_post(&state, post_id).await?;

    let liked = state
        .like_repository
        .toggle(user.id, parent.id)
        .await
        .map_err(|e| {
            error!("Failed to toggle like: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(LikeToggleResponse { liked }))
}

/// List a post's likes with pagination
pub async fn list_likes(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let parent = find_post(&state, post_id).await?;
    let (page, limit, offset) = query.resolve();

    let (items, total) = state
        .like_repository
        .list_for_post(parent.id, limit, offset)
        .await
        .map_err(|e| {
            error!("Failed to list likes: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(LikeListResponse {
        items,
        page,
        limit,
        total,
    }))
}

async fn find_post(state: &AppState, id: Uuid) -> Result<Post, ApiError> {
    state
        .post_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up post: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
}

async fn find_comment(state: &AppState, id: Uuid) -> Result<Comment, ApiError> {
    state
        .comment_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to look up comment: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))
}
