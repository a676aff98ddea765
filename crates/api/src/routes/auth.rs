//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /session   -> create_session (provider secret required)
/// GET  /me        -> me (session required)
/// POST /sign-out  -> sign_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::create_session))
        .route("/me", get(auth::me))
        .route("/sign-out", post(auth::sign_out))
}
