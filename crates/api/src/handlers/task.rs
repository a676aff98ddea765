//! Handlers for the `/tasks` resource.
//!
//! Every handler takes [`AuthUser`] first and scopes all queries to the
//! caller; another user's task answers 404 exactly like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::task::{CreateTaskRequest, Task, TaskDetail, UpdateTaskRequest};
use taskboard_core::types::DbId;
use taskboard_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::query::TaskListParams;
use crate::state::AppState;

/// GET /api/tasks?projectId=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<Task>>> {
    let rows = TaskRepo::list_for_user(&state.pool, auth.user_id, params.project_id).await?;
    let tasks = rows
        .into_iter()
        .map(Task::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let new_task = input.into_new_task()?;

    if let Some(project_id) = new_task.project_id {
        if !ProjectRepo::exists_for_user(&state.pool, project_id, auth.user_id).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "projectId {project_id} does not reference one of your projects"
            ))));
        }
    }

    let row = TaskRepo::create(&state.pool, auth.user_id, &new_task).await?;
    let task = Task::try_from(row)?;
    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let row = TaskRepo::find_detail_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    Ok(Json(TaskDetail::try_from(row)?))
}

/// PATCH /api/tasks/{id}
///
/// Title and status are required; the body is validated before the row is
/// looked up, so a rejected update never touches storage.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    let changes = input.into_changes()?;
    let row = TaskRepo::update(&state.pool, id, auth.user_id, &changes)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    tracing::info!(
        user_id = auth.user_id,
        task_id = id,
        status = changes.status.as_str(),
        "Task updated"
    );
    Ok(Json(Task::try_from(row)?))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Task", id))
    }
}
