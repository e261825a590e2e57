//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::auth::SessionUser;

use super::error::AppError;
use super::state::AppState;

/// The user behind a valid `Authorization: Bearer` token.
///
/// Rejects with 401 when the header is missing, malformed, or names an
/// expired or unknown session. Handlers that need their own 401 message
/// take `Option<AuthUser>` instead.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(&parts.headers).ok_or_else(|| AppError::unauthorized("Not logged in"))?;
        state
            .sessions
            .get(token)
            .await
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Not logged in"))
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
