//! Project row model.

use sqlx::FromRow;
use taskboard_core::project::Project;
use taskboard_core::types::{DbId, Timestamp};

/// A project row with its computed `tasks_count`.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub user_id: DbId,
    pub tasks_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            color: row.color,
            user_id: row.user_id,
            tasks_count: row.tasks_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
