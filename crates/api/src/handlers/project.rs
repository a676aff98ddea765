//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::project::{CreateProjectRequest, Project, UpdateProjectRequest};
use taskboard_core::types::DbId;
use taskboard_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let rows = ProjectRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(rows.into_iter().map(Project::from).collect()))
}

/// POST /api/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let new_project = input.into_new_project()?;
    let project = Project::from(ProjectRepo::create(&state.pool, auth.user_id, &new_project).await?);
    tracing::info!(user_id = auth.user_id, project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let row = ProjectRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(row.into()))
}

/// PATCH /api/projects/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let changes = input.into_changes()?;
    let row = ProjectRepo::update(&state.pool, id, auth.user_id, &changes)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    tracing::info!(user_id = auth.user_id, project_id = id, "Project updated");
    Ok(Json(row.into()))
}

/// DELETE /api/projects/{id}
///
/// The project's tasks survive with their project reference cleared.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}
