//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskboard_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::auth::session::session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session token.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// from the session cookie. Every task and project handler takes this
/// extractor, so a missing or invalid session answers 401 before any data
/// access.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Missing session"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired session"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
