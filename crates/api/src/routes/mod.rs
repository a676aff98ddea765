pub mod analytics;
pub mod auth;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/session                 exchange provider identity for a session (POST)
/// /auth/me                      current user (GET)
/// /auth/sign-out                clear the session cookie (POST)
///
/// /tasks                        list, create
/// /tasks/{id}                   get, update (PATCH), delete
///
/// /projects                     list, create
/// /projects/{id}                get, update (PATCH), delete
///
/// /analytics                    dashboard aggregates (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tasks", task::router())
        .nest("/projects", project::router())
        .nest("/analytics", analytics::router())
}
