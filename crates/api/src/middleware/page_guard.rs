//! Redirects unauthenticated browser navigation to the login page.
//!
//! API routes answer 401 through [`AuthUser`](crate::middleware::auth::AuthUser)
//! instead; this guard only looks at page loads.

use axum::extract::{Request, State};
use axum::http::header::LOCATION;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::jwt::validate_token;
use crate::auth::session::cookie_token;
use crate::state::AppState;

/// Path prefixes served without a session.
const PUBLIC_PREFIXES: &[&str] = &["/static/", "/assets/", "/_next/"];

/// Exact paths served without a session.
const PUBLIC_PATHS: &[&str] = &["/favicon.ico", "/health"];

/// Whether `path` needs a session before it is served.
pub fn is_protected_page(path: &str, login_path: &str) -> bool {
    if path == "/api" || path.starts_with("/api/") {
        return false;
    }
    if path == login_path || path.starts_with(&format!("{login_path}/")) {
        return false;
    }
    !(PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)))
}

/// Login URL carrying the original target as `callbackUrl`.
pub fn login_redirect_target(login_path: &str, original: &str) -> String {
    format!("{login_path}?callbackUrl={}", urlencoding::encode(original))
}

/// Middleware: 303 to the login page for protected GET/HEAD navigations
/// that carry no valid session cookie.
pub async fn require_page_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method();
    if method != Method::GET && method != Method::HEAD {
        return next.run(req).await;
    }

    let path = req.uri().path();
    if !is_protected_page(path, &state.config.login_path) {
        return next.run(req).await;
    }

    let has_session = cookie_token(req.headers())
        .is_some_and(|token| validate_token(token, &state.config.jwt).is_ok());
    if has_session {
        return next.run(req).await;
    }

    let original = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path);
    let target = login_redirect_target(&state.config.login_path, original);
    tracing::debug!(path = %path, "Redirecting unauthenticated navigation to login");

    (StatusCode::SEE_OTHER, [(LOCATION, target)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_login_and_static_paths_are_not_guarded() {
        for path in [
            "/api/tasks",
            "/login",
            "/login/callback",
            "/static/app.js",
            "/assets/logo.svg",
            "/_next/chunk.js",
            "/favicon.ico",
            "/health",
        ] {
            assert!(!is_protected_page(path, "/login"), "{path} should be public");
        }
    }

    #[test]
    fn pages_are_guarded() {
        for path in ["/", "/board", "/calendar", "/analytics", "/loginx"] {
            assert!(is_protected_page(path, "/login"), "{path} should be guarded");
        }
    }

    #[test]
    fn callback_url_is_percent_encoded() {
        assert_eq!(
            login_redirect_target("/login", "/board?projectId=3"),
            "/login?callbackUrl=%2Fboard%3FprojectId%3D3"
        );
    }
}
