//! Handlers for the `/auth` resource (session exchange, current user, sign-out).
//!
//! Credentials are checked by an external identity provider. Once it has
//! authenticated someone, its callback exchanges the identity for a session
//! token here, authenticating itself with the shared provider secret.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::extract::State;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Serialize;
use taskboard_core::error::CoreError;
use taskboard_core::user::{SignInRequest, User};
use taskboard_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::session::{cleared_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Header the identity provider uses to present the shared secret.
pub const PROVIDER_SECRET_HEADER: &str = "x-provider-secret";

/// Successful session exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// POST /api/auth/session
///
/// Upserts the user by email (first sign-in creates it) and issues a session
/// token, both in the body and as the session cookie.
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let presented = headers
        .get(PROVIDER_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(state.config.provider_secret.as_str()) {
        tracing::warn!("Session exchange rejected: bad provider secret");
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid provider credentials".into(),
        )));
    }

    let sign_in = input.into_sign_in()?;
    let user: User = UserRepo::upsert_by_email(&state.pool, &sign_in).await?.into();

    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.expires_in_secs();
    tracing::info!(user_id = user.id, "Session issued");

    let cookie = session_cookie(&access_token, expires_in);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse {
            access_token,
            expires_in,
            user,
        }),
    ))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))?;
    Ok(Json(user.into()))
}

/// POST /api/auth/sign-out
///
/// Clears the session cookie. Tokens are stateless, so a copied Bearer
/// token stays valid until it expires.
pub async fn sign_out() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, cleared_session_cookie())]),
    )
}
