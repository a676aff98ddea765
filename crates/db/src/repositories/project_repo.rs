//! Repository for the `projects` table.

use sqlx::PgPool;
use taskboard_core::project::{NewProject, UpdateProjectRequest};
use taskboard_core::types::DbId;

use crate::models::project::ProjectRow;

/// Column list with the computed task count, selecting from alias `p`.
const COLUMNS: &str = "p.id, p.name, p.description, p.color, p.user_id, \
     (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id) AS tasks_count, \
     p.created_at, p.updated_at";

/// Provides owner-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `user_id`, returning it with a zero count.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewProject,
    ) -> Result<ProjectRow, sqlx::Error> {
        sqlx::query_as::<_, ProjectRow>(
            "INSERT INTO projects (name, description, color, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, color, user_id, 0::BIGINT AS tasks_count,
                       created_at, updated_at",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.color)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List the user's projects, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p
             WHERE p.user_id = $1
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects p WHERE p.id = $1 AND p.user_id = $2");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `id` names a project owned by `user_id`.
    pub async fn exists_for_user(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user owns no project with the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateProjectRequest,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE projects SET
                    name = COALESCE($3, name),
                    description = COALESCE($4, description),
                    color = COALESCE($5, color),
                    updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                RETURNING *
             )
             SELECT {COLUMNS} FROM p"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Its tasks are kept and lose their project reference.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
