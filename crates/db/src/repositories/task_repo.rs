//! Repository for the `tasks` table.
//!
//! Reads always join the owning project's name and color so rows convert
//! straight into the wire [`Task`](taskboard_core::task::Task).

use sqlx::PgPool;
use taskboard_core::task::{NewTask, TaskChanges};
use taskboard_core::types::DbId;

use crate::models::task::{TaskDetailRow, TaskRow};

/// Column list over task alias `t` and left-joined project alias `p`.
const COLUMNS: &str = "t.id, t.title, t.description, t.status_id, t.priority_id, t.due_date, \
     t.tags, t.project_id, t.user_id, t.created_at, t.updated_at, \
     p.name AS project_name, p.color AS project_color";

/// Provides owner-scoped CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List the user's tasks, newest first, optionally limited to one project.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<Vec<TaskRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE t.user_id = $1 AND ($2::BIGINT IS NULL OR t.project_id = $2)
             ORDER BY t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(user_id)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new task owned by `user_id`, returning the joined row.
    pub async fn create(pool: &PgPool, user_id: DbId, input: &NewTask) -> Result<TaskRow, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                INSERT INTO tasks
                    (title, description, status_id, priority_id, due_date, tags, project_id, user_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
             )
             SELECT {COLUMNS} FROM t
             LEFT JOIN projects p ON p.id = t.project_id"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.id())
            .bind(input.priority.id())
            .bind(input.due_date)
            .bind(&input.tags)
            .bind(input.project_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find one of the user's tasks by id.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND t.user_id = $2"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find one of the user's tasks with project and owner joined.
    pub async fn find_detail_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<TaskDetailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.name AS user_name, u.email AS user_email, u.image AS user_image
             FROM tasks t
             JOIN users u ON u.id = t.user_id
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND t.user_id = $2"
        );
        sqlx::query_as::<_, TaskDetailRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite title and status, apply the optional fields that are set
    /// (a present-but-empty description or due date clears the column),
    /// and refresh `updated_at`. No version check: last writer wins.
    ///
    /// Returns `None` if the user owns no task with the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        changes: &TaskChanges,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                UPDATE tasks SET
                    title = $3,
                    status_id = $4,
                    description = CASE WHEN $9 THEN $5 ELSE description END,
                    priority_id = COALESCE($6::SMALLINT, priority_id),
                    due_date = CASE WHEN $10 THEN $7::TIMESTAMPTZ ELSE due_date END,
                    tags = COALESCE($8::TEXT[], tags),
                    updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                RETURNING *
             )
             SELECT {COLUMNS} FROM t
             LEFT JOIN projects p ON p.id = t.project_id"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&changes.title)
            .bind(changes.status.id())
            .bind(changes.description.as_ref().and_then(Option::as_deref))
            .bind(changes.priority.map(|p| p.id()))
            .bind(changes.due_date.flatten())
            .bind(&changes.tags)
            .bind(changes.description.is_some())
            .bind(changes.due_date.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete one of the user's tasks. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
