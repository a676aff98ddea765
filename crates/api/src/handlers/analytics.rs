//! Handler for the analytics dashboard.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use taskboard_core::analytics::{compute_analytics, Analytics};
use taskboard_core::project::Project;
use taskboard_core::task::Task;
use taskboard_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::AnalyticsParams;
use crate::state::AppState;

/// GET /api/analytics?tzOffsetMinutes=
///
/// Aggregates the caller's full task list in memory.
pub async fn get_analytics(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<Analytics>> {
    let offset = params.offset()?;

    let tasks = TaskRepo::list_for_user(&state.pool, auth.user_id, None)
        .await?
        .into_iter()
        .map(Task::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let projects: Vec<Project> = ProjectRepo::list_for_user(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(Project::from)
        .collect();

    Ok(Json(compute_analytics(&tasks, &projects, Utc::now(), &offset)))
}
