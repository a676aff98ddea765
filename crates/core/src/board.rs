//! Kanban board filtering and grouping.
//!
//! The board shows three columns (todo, in progress, done). A task collection
//! is narrowed by project, title query and tags, then partitioned by status
//! preserving relative order. Drag-and-drop completions resolve to at most
//! one status change.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};
use crate::types::DbId;

/// Active board filters. Default filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardFilter {
    /// Only tasks in this project when set.
    pub project_id: Option<DbId>,
    /// Case-insensitive title substring.
    pub query: String,
    /// Keep tasks carrying at least one of these tags. Empty disables.
    pub tags: Vec<String>,
}

impl BoardFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if self.project_id.is_some() && task.project_id != self.project_id {
            return false;
        }
        if !task.title_matches(&self.query) {
            return false;
        }
        self.tags.is_empty() || task.tags.iter().any(|t| self.tags.contains(t))
    }
}

/// The three board columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Total number of tasks across all columns.
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filter `tasks` and partition the remainder into status columns.
pub fn group_tasks(tasks: &[Task], filter: &BoardFilter) -> Board {
    let mut board = Board::default();
    for task in tasks.iter().filter(|t| filter.matches(t)) {
        board.column_mut(task.status).push(task.clone());
    }
    board
}

/// A status change produced by a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: DbId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Resolve a drag-and-drop completion.
///
/// `destination` is `None` when the card was released outside any column.
/// Returns `None` for that case, for an unknown task, and for a drop back
/// into the task's own column.
pub fn resolve_drop(
    tasks: &[Task],
    task_id: DbId,
    destination: Option<TaskStatus>,
) -> Option<StatusChange> {
    let to = destination?;
    let task = tasks.iter().find(|t| t.id == task_id)?;
    (task.status != to).then_some(StatusChange {
        task_id,
        from: task.status,
        to,
    })
}
