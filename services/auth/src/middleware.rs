//! Middleware for session-token validation

use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use tracing::error;

use crate::{AppState, routes::AuthError};

/// Extract and verify the bearer session token from the Authorization header
///
/// On success the verified user id is inserted into the request extensions
/// and passed explicitly to handlers; no global request context. Rejections
/// carry the same structured error body as the handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AuthError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::Unauthorized("Invalid authorization header".to_string()))?;

    let claims = state.token_service.verify(token).map_err(|e| {
        error!("Failed to verify token: {}", e);
        AuthError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims.sub);

    Ok(next.run(req).await)
}
