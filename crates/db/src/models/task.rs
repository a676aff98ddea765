//! Task row models.
//!
//! Status and priority are stored as lookup ids; converting a row into the
//! wire [`Task`] fails with a decode error if an id has no known variant.

use sqlx::FromRow;
use taskboard_core::task::{LookupId, ProjectRef, Task, TaskDetail, TaskPriority, TaskStatus};
use taskboard_core::types::{DbId, Timestamp};
use taskboard_core::user::User;

/// A task row joined with its project's name and color.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status_id: LookupId,
    pub priority_id: LookupId,
    pub due_date: Option<Timestamp>,
    pub tags: Vec<String>,
    pub project_id: Option<DbId>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project_name: Option<String>,
    pub project_color: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = sqlx::Error;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_id(row.status_id).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown task status id {}", row.status_id).into())
        })?;
        let priority = TaskPriority::from_id(row.priority_id).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown task priority id {}", row.priority_id).into())
        })?;
        let project = match (row.project_name, row.project_color) {
            (Some(name), Some(color)) => Some(ProjectRef { name, color }),
            _ => None,
        };

        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            priority,
            due_date: row.due_date,
            tags: row.tags,
            project_id: row.project_id,
            project,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A task row with its project and owner joined.
#[derive(Debug, Clone, FromRow)]
pub struct TaskDetailRow {
    #[sqlx(flatten)]
    pub task: TaskRow,
    pub user_name: Option<String>,
    pub user_email: String,
    pub user_image: Option<String>,
}

impl TryFrom<TaskDetailRow> for TaskDetail {
    type Error = sqlx::Error;

    fn try_from(row: TaskDetailRow) -> Result<Self, Self::Error> {
        let user = User {
            id: row.task.user_id,
            name: row.user_name,
            email: row.user_email,
            image: row.user_image,
        };
        Ok(TaskDetail {
            task: Task::try_from(row.task)?,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status_id: LookupId, priority_id: LookupId) -> TaskRow {
        let ts = chrono::Utc::now();
        TaskRow {
            id: 1,
            title: "t".into(),
            description: None,
            status_id,
            priority_id,
            due_date: None,
            tags: vec!["a".into()],
            project_id: Some(3),
            user_id: 9,
            created_at: ts,
            updated_at: ts,
            project_name: Some("Demo".into()),
            project_color: Some("red".into()),
        }
    }

    #[test]
    fn row_maps_lookup_ids_and_project() {
        let task = Task::try_from(row(2, 3)).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(
            task.project,
            Some(ProjectRef {
                name: "Demo".into(),
                color: "red".into(),
            })
        );
    }

    #[test]
    fn unknown_lookup_id_is_a_decode_error() {
        assert!(matches!(Task::try_from(row(9, 1)), Err(sqlx::Error::Decode(_))));
        assert!(matches!(Task::try_from(row(1, 0)), Err(sqlx::Error::Decode(_))));
    }
}
