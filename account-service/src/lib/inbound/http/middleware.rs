use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::errors::AccountError;
use crate::account::models::AccessClaims;
use crate::account::models::Role;
use crate::account::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
}

/// Middleware that validates access tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims: AccessClaims = state.authenticator.verify_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token validation failed");
        AccountError::InvalidToken(e.to_string())
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse user ID from token");
        AccountError::InvalidToken(e.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
