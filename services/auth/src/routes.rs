//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::auth_middleware,
    models::{LoginCredentials, NewUser, User},
    validation,
};

/// Public view of a user, stripped of the password hash
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// Response carrying a freshly issued session token
#[derive(Serialize)]
pub struct TokenResponse {
    pub user: UserResponse,
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response for profile fetch
#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// Request for email verification
#[derive(Deserialize)]
pub struct EmailVerificationRequest {
    pub email: String,
}

/// Query parameters for email verification confirmation
#[derive(Deserialize)]
pub struct ConfirmVerificationQuery {
    pub token: String,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route(
            "/auth/email-verification/request",
            post(request_email_verification),
        )
        .route(
            "/auth/email-verification/confirm",
            post(confirm_email_verification),
        )
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(serde_json::json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "service": "auth-service"
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Registration attempt for username: {}", payload.username);

    validation::validate_username(&payload.username).map_err(AuthError::Validation)?;
    validation::validate_email(&payload.email).map_err(AuthError::Validation)?;
    validation::validate_password(&payload.password).map_err(AuthError::Validation)?;

    let taken = state
        .user_repository
        .identifier_taken(&payload.username, &payload.email)
        .await
        .map_err(|e| {
            error!("Failed to check identifier availability: {}", e);
            AuthError::InternalServerError
        })?;

    if taken {
        return Err(AuthError::Conflict(
            "Username or email is already taken".to_string(),
        ));
    }

    let user = state
        .user_repository
        .create(&payload)
        .await
        .map_err(|e| {
            // A concurrent registration can still hit the unique constraint
            if is_unique_violation(&e) {
                return AuthError::Conflict("Username or email is already taken".to_string());
            }
            error!("Failed to create user: {}", e);
            AuthError::InternalServerError
        })?;

    let token = state.token_service.issue(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        AuthError::InternalServerError
    })?;

    let response = TokenResponse {
        user: UserResponse::from(&user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_service.token_expiry(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for: {}", payload.username_or_email);

    let allowed = state
        .rate_limiter
        .is_allowed(&payload.username_or_email)
        .await
        .map_err(|e| {
            error!("Rate limiter failure: {}", e);
            AuthError::InternalServerError
        })?;

    if !allowed {
        return Err(AuthError::Unauthorized(
            "Too many login attempts, try again later".to_string(),
        ));
    }

    let user = state
        .user_repository
        .find_by_username_or_email(&payload.username_or_email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| AuthError::Unauthorized("Invalid credentials".to_string()))?;

    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::InternalServerError
        })?;

    if !password_ok {
        return Err(AuthError::Unauthorized("Invalid credentials".to_string()));
    }

    if !user.email_verified {
        return Err(AuthError::Unauthorized(
            "Please verify your email before logging in".to_string(),
        ));
    }

    state.rate_limiter.reset(&payload.username_or_email).await;

    let token = state.token_service.issue(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        AuthError::InternalServerError
    })?;

    let response = TokenResponse {
        user: UserResponse::from(&user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_service.token_expiry(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Profile fetch endpoint, requires a valid bearer token
pub async fn profile(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, AuthError> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| AuthError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserResponse::from(&user),
    }))
}

/// Email verification request endpoint
///
/// Always responds with the same message so callers cannot probe which
/// addresses are registered. The token itself is delivered out of band and
/// never included in the response.
pub async fn request_email_verification(
    State(state): State<AppState>,
    Json(payload): Json<EmailVerificationRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validation::validate_email(&payload.email).map_err(AuthError::Validation)?;

    let user = state
        .user_repository
        .find_by_username_or_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?;

    if let Some(user) = user {
        if !user.email_verified {
            state
                .verification_repository
                .create_token(user.id)
                .await
                .map_err(|e| {
                    error!("Failed to create verification token: {}", e);
                    AuthError::InternalServerError
                })?;
        }
    }

    Ok(Json(serde_json::json!({
        "message": "If the address is registered, a verification email has been sent"
    })))
}

/// Email verification confirmation endpoint
pub async fn confirm_email_verification(
    State(state): State<AppState>,
    Query(query): Query<ConfirmVerificationQuery>,
) -> Result<impl IntoResponse, AuthError> {
    let user_id = state
        .verification_repository
        .consume_token(&query.token)
        .await
        .map_err(|e| {
            error!("Failed to consume verification token: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| {
            AuthError::Validation("Invalid or expired verification token".to_string())
        })?;

    info!("Email verification confirmed for user {}", user_id);

    Ok(Json(serde_json::json!({
        "message": "Email verified successfully"
    })))
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    )
}

/// Custom error type for authentication errors
#[derive(Debug)]
pub enum AuthError {
    Validation(String),
    Unauthorized(String),
    Conflict(String),
    NotFound(String),
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AuthError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AuthError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limiter::{RateLimiter, RateLimiterConfig};
    use crate::repositories::{UserRepository, VerificationRepository};
    use common::token::{TokenConfig, TokenService};
    use sqlx::PgPool;

    fn test_state() -> AppState {
        // Lazy pool: never connects, the paths under test reject earlier
        let pool = PgPool::connect_lazy("postgresql://localhost/unused").unwrap();

        AppState {
            db_pool: pool.clone(),
            token_service: TokenService::new(TokenConfig {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                token_expiry: 3600,
            }),
            user_repository: UserRepository::new(pool.clone()),
            verification_repository: VerificationRepository::new(pool),
            rate_limiter: RateLimiter::new(RateLimiterConfig::default()),
        }
    }

    async fn spawn_router() -> String {
        let app = create_router(test_state());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_rejected_token_carries_json_error_body() {
        let base = spawn_router().await;
        let client = reqwest::Client::new();

        let resp = client
            .get(format!("{}/auth/profile", base))
            .header("Authorization", "Bearer not-a-token")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_authorization_header_carries_json_error_body() {
        let base = spawn_router().await;

        let resp = reqwest::get(format!("{}/auth/profile", base)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}
