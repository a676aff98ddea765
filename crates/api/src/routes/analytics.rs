use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(analytics::get_analytics))
}
